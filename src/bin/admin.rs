#![cfg(not(tarpaulin_include))]

use log::error;
use rsvp::console::{Command, HELP, execute};
use rsvp::{Config, RsvpBook};
use std::io::{self, Write};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let mut config = Config::from_env()?;
    // An explicit path on the command line wins over RSVP_DATA_FILE
    if let Some(path) = std::env::args().nth(1) {
        config.data_file = path.into();
    }

    let mut book = RsvpBook::open(config)?;
    println!(
        "{} RSVP(s) loaded from {}. Type help for commands.",
        book.list().len(),
        book.store().path().display()
    );

    let mut start_time = Instant::now();
    let mut status = String::from("ok");
    loop {
        let elapsed_time = start_time.elapsed().as_secs_f64();
        print!("[{:.1}] ({}) > ", elapsed_time, status);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        start_time = Instant::now();

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                status = message;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{}", HELP);
                status = String::from("ok");
            }
            command => match execute(&mut book, command) {
                Ok(output) => {
                    if !output.is_empty() {
                        println!("{}", output);
                    }
                    status = String::from("ok");
                }
                Err(e) if e.is_user_error() => status = e.to_string(),
                Err(e) => {
                    error!("command failed: {}", e);
                    status = String::from("error");
                }
            },
        }
    }

    Ok(())
}
