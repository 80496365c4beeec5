fn main() -> Result<(), Box<dyn std::error::Error>> {
    starfield::logging::init()?;
    starfield::ui::run()?;
    Ok(())
}
