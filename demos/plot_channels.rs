//! Command-line tool for colorspace_workshop
//!
//! Loads one image and writes its channel decompositions as PNG figures

use colorspace_workshop::{
    image_read, image_show, plot_channels, ChannelPlotOptions, LoadMode, PlotMode, PngSink,
    RenderConfig,
};
use std::path::{Path, PathBuf};
use std::{env, process};

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    let mut config = RenderConfig::default();
    let mut image_path_arg = None;
    let mut modes = Vec::new();

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--out" => {
                i += 1;
                match args.get(i) {
                    Some(dir) => config.output_dir = PathBuf::from(dir),
                    None => {
                        eprintln!("Error: --out needs a directory");
                        process::exit(1);
                    }
                }
            }
            "--config" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    eprintln!("Error: --config needs a file");
                    process::exit(1);
                };
                config = match RenderConfig::from_json_file(Path::new(path)) {
                    Ok(cfg) => cfg,
                    Err(e) => {
                        eprintln!("Error loading config file: {}", e);
                        process::exit(1);
                    }
                };
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path_arg.is_none() {
                    image_path_arg = Some(arg.to_string());
                } else {
                    match arg.parse::<PlotMode>() {
                        Ok(mode) => modes.push(mode),
                        Err(e) => {
                            eprintln!("Error: {}", e);
                            process::exit(1);
                        }
                    }
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let image_path = match image_path_arg {
        Some(path) => PathBuf::from(path),
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    };

    if modes.is_empty() {
        modes.extend(PlotMode::ALL.iter().filter(|m| **m != PlotMode::Custom));
    }

    let mut sink = PngSink::from_config(config);

    match image_read(&image_path, LoadMode::Color) {
        Ok(image) => image_show(&mut sink, &image, Some("Original"), None),
        Err(error) => {
            eprintln!("Loading failed: {}", error);
            eprintln!("Suggestion: {}", error.user_message());
            process::exit(1);
        }
    }

    let mut failures = 0;
    for mode in modes {
        let result = image_read(&image_path, mode.input_mode()).and_then(|image| {
            let options = ChannelPlotOptions::default()
                .with_title(format!("{} channels", mode.as_str().to_uppercase()));
            plot_channels(&mut sink, &image, mode, &options)
        });

        if let Err(error) = result {
            eprintln!("{}: {}", mode, error);
            failures += 1;
        }
    }

    eprintln!();
    eprintln!("Figures written to {}:", sink.output_dir().display());
    for path in sink.written() {
        eprintln!("  {}", path.display());
    }

    if failures > 0 {
        process::exit(1);
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path> [MODE...]", program_name);
    eprintln!();
    eprintln!("Plot the color channels of an image in several color spaces.");
    eprintln!();
    eprintln!("Modes: rgb, bgr, cmy, yiq, yuv, hsl, hsv, lab (default: all of them)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --out DIR        Output directory for figures (default: figures/)");
    eprintln!("  --config FILE    JSON render configuration");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} parrot.jpg", program_name);
    eprintln!("  {} --out plots/ parrot.jpg hsl hsv", program_name);
}
