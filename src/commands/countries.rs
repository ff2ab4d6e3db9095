use crate::api;

/// Print the nationality codes the API documents, one per line.
pub fn run() {
    println!("{:<6}COUNTRY", "CODE");
    for (code, name) in api::COUNTRIES {
        println!("{code:<6}{name}");
    }
}
