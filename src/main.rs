fn main() {
    if let Err(err) = career_timeline::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
