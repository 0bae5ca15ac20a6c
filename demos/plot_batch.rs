//! Batch channel plots for every image in a directory
//!
//! Each image gets its own output subdirectory under the configured output path

use colorspace_workshop::{
    image_loader::is_supported_extension, image_read, plot_channels, ChannelPlotOptions,
    PlotMode, PngSink, RenderConfig,
};
use std::path::{Path, PathBuf};
use std::{env, fs, process};

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help(&args[0]);
        process::exit(1);
    }

    let input_path = Path::new(&args[1]);
    let config = match args.get(2) {
        Some(config_path) => match RenderConfig::from_json_file(Path::new(config_path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error loading config file: {}", e);
                process::exit(1);
            }
        },
        None => RenderConfig::default(),
    };

    let image_files = match find_image_files(input_path) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error finding image files: {}", e);
            process::exit(1);
        }
    };

    if image_files.is_empty() {
        eprintln!("No image files found in {}", input_path.display());
        process::exit(1);
    }

    eprintln!("Found {} image files to process", image_files.len());
    eprintln!();

    let mut success_count = 0;
    let mut error_count = 0;

    for (i, image_path) in image_files.iter().enumerate() {
        let base_name = image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");

        eprint!("[{}/{}] Processing {}... ", i + 1, image_files.len(), base_name);

        let mut sink = PngSink::from_config(RenderConfig {
            output_dir: config.output_dir.join(base_name),
            ..config.clone()
        });

        match plot_all_modes(&mut sink, image_path) {
            Ok(()) => {
                eprintln!("ok ({} figures)", sink.written().len());
                success_count += 1;
            }
            Err(error) => {
                eprintln!("failed: {}", error);
                error_count += 1;
            }
        }
    }

    eprintln!();
    eprintln!("Batch processing complete:");
    eprintln!("  Success: {}", success_count);
    eprintln!("  Errors: {}", error_count);
    eprintln!("  Figures saved to: {}", config.output_dir.display());

    if error_count > 0 {
        process::exit(1);
    }
}

fn plot_all_modes(sink: &mut PngSink, image_path: &Path) -> colorspace_workshop::Result<()> {
    for mode in PlotMode::ALL.iter().filter(|m| **m != PlotMode::Custom) {
        let image = image_read(image_path, mode.input_mode())?;
        let options = ChannelPlotOptions::default()
            .with_title(format!("{} channels", mode.as_str().to_uppercase()));
        plot_channels(&mut *sink, &image, *mode, &options)?;
    }
    Ok(())
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} <image_dir> [render_config.json]", program_name);
    eprintln!();
    eprintln!("Plot the channels of every image in a directory, in every color space.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} workshop/images", program_name);
    eprintln!("  {} workshop/images render.json", program_name);
}

fn find_image_files(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    if dir.is_file() {
        files.push(dir.to_path_buf());
        return Ok(files);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_extension(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
