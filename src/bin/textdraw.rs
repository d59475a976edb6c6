use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    textdraw::app::run_textdraw(std::env::args().skip(1))
}
