// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use std::fmt::Write;

/// JSON course map with `courses` x `modules` x `lessons`, each lesson
/// holding one terminal block and one quiz of three questions
#[allow(dead_code)]
pub fn generate_course_json(courses: usize, modules: usize, lessons: usize) -> String {
    let mut json = String::from("{");
    for c in 0..courses {
        if c > 0 {
            json.push(',');
        }
        write!(
            json,
            r#""course-{c}":{{"title":"Course {c}","description":"Generated","duration":"1h","tags":["bench"],"modules":{{"#
        )
        .unwrap();
        for m in 0..modules {
            if m > 0 {
                json.push(',');
            }
            write!(
                json,
                r#""module-{m}":{{"title":"Module {m}","description":"Generated","lessons":{{"#
            )
            .unwrap();
            for l in 0..lessons {
                if l > 0 {
                    json.push(',');
                }
                json.push_str(&generate_lesson_json(l));
            }
            json.push_str("}}");
        }
        json.push_str("}}");
    }
    json.push('}');
    json
}

#[allow(dead_code)]
fn generate_lesson_json(index: usize) -> String {
    let questions: Vec<_> = (0..3)
        .map(|q| {
            format!(
                r#"{{"id":"q{q}","prompt":"Question {q}?","options":["a","b","c"],"answerIndex":{},"explanation":"Because."}}"#,
                q % 3
            )
        })
        .collect();
    format!(
        r#""lesson-{index}":{{"title":"Lesson {index}","content":"Some **markdown** with `code` about accounts and programs.","duration":"5 min","blocks":[{{"type":"terminal","id":"term","title":"Run it","steps":[{{"cmd":"solana --version","output":"solana-cli 1.18"}}]}},{{"type":"quiz","id":"quiz","title":"Check","questions":[{}]}}]}}"#,
        questions.join(",")
    )
}
