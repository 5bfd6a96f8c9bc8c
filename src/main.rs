fn main() {
    if let Err(err) = timeline_layout::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
