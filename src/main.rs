use apdu2text::EnergyObject;
use log::error;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize logging
    let default_filter = env::var("A2T_LOG_LEVEL").unwrap_or("info".to_string());
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    let args: Vec<String> = env::args().skip(1).collect();
    let json_output = args.iter().any(|arg| arg == "--json");
    let mut positional = args.iter().filter(|arg| !arg.starts_with("--"));
    let (oad_hex, value_hex) = match (positional.next(), positional.next()) {
        (Some(oad), Some(value)) => (oad.clone(), value.replace(' ', "")),
        _ => {
            eprintln!("usage: apdu2text <OAD_HEX> <VALUE_HEX> [--json]");
            return ExitCode::from(2);
        }
    };

    if hex::decode(&value_hex).is_err() {
        error!("Non hex string received: {}", value_hex);
        return ExitCode::FAILURE;
    }

    let object = EnergyObject::new(&oad_hex, &value_hex);
    if let Some(err) = object.last_error() {
        error!("Failed to decode {}: {}", oad_hex, err);
    }

    if json_output {
        match serde_json::to_string_pretty(&object.to_report()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", object.to_format_string());
    }

    match object.last_error() {
        Some(_) => ExitCode::FAILURE,
        None => ExitCode::SUCCESS,
    }
}
