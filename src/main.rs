fn main() -> Result<(), Box<dyn std::error::Error>> {
    log_sift::run()
}
