use std::path::PathBuf;

use comunidad::config::Config;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args().skip(1);
    let mut api_url: Option<String> = None;
    let mut data_dir: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api-url" | "-u" => {
                api_url = args.next();
                if api_url.is_none() {
                    eprintln!("Error: --api-url requires a URL argument");
                    std::process::exit(1);
                }
            }
            "--data-dir" | "-d" => {
                data_dir = args.next().map(PathBuf::from);
                if data_dir.is_none() {
                    eprintln!("Error: --data-dir requires a path argument");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                println!("Comunidad - community management console");
                println!();
                println!("Usage: comunidad [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -u, --api-url <URL>    API gateway (default: $COMUNIDAD_API_URL or http://localhost:8000)");
                println!("  -d, --data-dir <PATH>  Local session store (default: $COMUNIDAD_DATA_DIR or .data)");
                println!("  -h, --help             Show this help");
                println!();
                println!("Set RUST_LOG=debug to trace requests.");
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
        }
    }

    let mut config = Config::from_env();
    if let Some(url) = api_url {
        config.api_url = url;
    }
    if let Some(dir) = data_dir {
        config = config.with_data_dir(&dir);
    }

    if let Err(e) = comunidad::cli::run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
