use clap::{Arg, Command};
use piston_window::{EventLoop, PistonWindow, WindowSettings};
use plotters::drawing::IntoDrawingArea;
use plotters::prelude::{ChartBuilder, Circle, LineSeries, Text, BLACK, GREEN, RED, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, IntoFont};
use plotters_piston::draw_piston_window;
use tfluna_data::ProtocolVariant;
use tfluna_radar::{run_acquisition, AcquisitionConfig, RadarScene, DEFAULT_PORT};

const CANVAS_SIZE: u32 = 710;
const HALF_CANVAS: f64 = 355.;
const BOUNDARY_RADIUS: f64 = 350.;
const FPS: u64 = 60;

fn parse_args() -> AcquisitionConfig {
    let matches = Command::new("Radar display.")
        .about("Reads range frames from a serial port and draws the polar field.")
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

    let mut window: PistonWindow = WindowSettings::new("Radar Interface", [CANVAS_SIZE; 2])
        .build()
        .unwrap();
    window.set_max_fps(FPS);

    let mut scene = RadarScene::new();
    while draw_piston_window(&mut window, |b| {
        while let Ok(sample) = sample_rx.try_recv() {
            scene.apply(&sample);
        }

        let root = b.into_drawing_area();
        root.fill(&BLACK)?;

        let mut cc = ChartBuilder::on(&root)
            .build_cartesian_2d(-HALF_CANVAS..HALF_CANVAS, -HALF_CANVAS..HALF_CANVAS)?;

        // Boundary circle and crosshairs. The chart spans one unit per pixel,
        // so the pixel radius equals the chart radius.
        cc.draw_series(std::iter::once(Circle::new(
            (0., 0.),
            BOUNDARY_RADIUS as i32,
            GREEN,
        )))?;
        cc.draw_series(LineSeries::new(
            [(0., -BOUNDARY_RADIUS), (0., BOUNDARY_RADIUS)],
            &GREEN,
        ))?;
        cc.draw_series(LineSeries::new(
            [(-BOUNDARY_RADIUS, 0.), (BOUNDARY_RADIUS, 0.)],
            &GREEN,
        ))?;

        cc.draw_series(
            scene
                .points()
                .map(|point| Circle::new(point, 2, GREEN.filled())),
        )?;

        if let Some(sweep) = scene.sweep() {
            cc.draw_series(LineSeries::new([(0., 0.), sweep.tip], &RED))?;
            cc.draw_series(std::iter::once(Text::new(
                format!("{} cm", sweep.distance),
                (HALF_CANVAS - 15., HALF_CANVAS - 15.),
                ("sans-serif", 20)
                    .into_font()
                    .color(&WHITE)
                    .pos(Pos::new(HPos::Right, VPos::Top)),
            )))?;
        }

        Ok(())
    })
    .is_some()
    {}

    drop(driver_threads);
}
