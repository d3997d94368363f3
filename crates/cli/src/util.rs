use nu_ansi_term::Color;
use tracing::warn;

pub fn prompt_cli(msg: impl AsRef<str>) -> String {
    println!("{}", Color::Rgb(252, 186, 3).paint(msg.as_ref()));

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .expect("Failed to read line");
    input.trim().to_owned()
}

/// Asks for the repetition count until the answer parses.
pub fn prompt_repetitions() -> u64 {
    loop {
        let input = prompt_cli("How many times should each private key deploy and transfer?");
        match input.parse::<u64>() {
            Ok(n) => return n,
            Err(_) => warn!("'{input}' is not a number, try again"),
        }
    }
}
