use std::error::Error;

pub fn run() -> Result<(), Box<dyn Error>> {
    println!("{}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
