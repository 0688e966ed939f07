use clap::{Arg, Command};
use tfluna_data::ProtocolVariant;
use tfluna_radar::{run_acquisition, AcquisitionConfig, DEFAULT_PORT};

fn parse_args() -> AcquisitionConfig {
    let matches = Command::new("Radar sample reader.")
        .about("Reads range frames from a serial port and prints the samples.")
        .disable_version_flag(true)
        .arg(
            Arg::new("port")
                .help("The device path to a serial port")
                .default_value(DEFAULT_PORT),
        )
        .arg(
            Arg::new("baud")
                .long("baud")
                .value_parser(clap::value_parser!(u32))
                .default_value("15200")
                .help("Baud rate of the serial link"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .default_value("implicit")
                .help("Wire format: implicit or explicit"),
        )
        .get_matches();

    let port_name: &String = matches.get_one("port").unwrap();
    let baud_rate: u32 = *matches.get_one("baud").unwrap();
    let format: &String = matches.get_one("format").unwrap();
    let variant = ProtocolVariant::from_name(format).unwrap_or_else(|| {
        eprintln!("Unknown wire format \"{}\". Use \"implicit\" or \"explicit\".", format);
        std::process::exit(1);
    });

    AcquisitionConfig {
        port_name: port_name.to_string(),
        baud_rate,
        variant,
    }
}

fn main() {
    env_logger::init();
    let config = parse_args();

    let (driver_threads, sample_rx) = match run_acquisition(&config) {
        Ok(launched) => launched,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // Ends when the acquisition thread exits and drops its sender.
    while let Ok(sample) = sample_rx.recv() {
        println!("{:>3}°: {} cm", sample.angle, sample.distance);
    }

    drop(driver_threads);
}
