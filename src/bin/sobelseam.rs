// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{value_t, App, AppSettings, Arg, ArgGroup, ArgMatches};
use failure::{format_err, Error, ResultExt};
use log::info;
use sobelseam::codec::{load_image, save_image};
use sobelseam::visualize::{draw_seams, energy_to_image, grayscale_image};
use sobelseam::{EnergyRefresh, SeamCarver, SeamGraph, SeamSelector, Target};
use std::path::{Path, PathBuf};
use std::process;

fn args<'a>() -> ArgMatches<'a> {
    App::new("sobelseam")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Narrow an image by removing its lowest-energy vertical seams")
        .setting(AppSettings::ArgRequiredElseHelp)
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the carved image")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("width")
                .help("The width to carve down to")
                .short("w")
                .long("width")
                .takes_value(true)
                .value_name("N"),
        )
        .arg(
            Arg::with_name("remove")
                .help("The number of columns to remove")
                .short("r")
                .long("remove")
                .takes_value(true)
                .value_name("N"),
        )
        .group(
            ArgGroup::with_name("target")
                .args(&["width", "remove"])
                .required(true),
        )
        .arg(
            Arg::with_name("grayscale")
                .help("Write the luminance of the source image here")
                .long("grayscale")
                .takes_value(true)
                .value_name("PATH"),
        )
        .arg(
            Arg::with_name("energy")
                .help("Write the normalized energy map of the source image here")
                .long("energy")
                .takes_value(true)
                .value_name("PATH"),
        )
        .arg(
            Arg::with_name("seams")
                .help("Write every candidate seam of the source image, drawn over its energy map, here")
                .long("seams")
                .takes_value(true)
                .value_name("PATH"),
        )
        .arg(
            Arg::with_name("steps")
                .help("Write the image after every removed column into this directory")
                .long("steps")
                .takes_value(true)
                .value_name("DIR"),
        )
        .arg(
            Arg::with_name("recompute-energy")
                .help("Recompute the energy map from pixels after every removed column")
                .long("recompute-energy"),
        )
        .get_matches()
}

// Clap enforces required arguments; this only turns a missing one into
// an error instead of a panic.
fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Error> {
    matches
        .value_of(name)
        .ok_or_else(|| format_err!("missing required argument <{}>", name))
}

fn target_of(matches: &ArgMatches) -> Result<Target, Error> {
    if matches.is_present("width") {
        Ok(Target::Width(value_t!(matches, "width", u32)?))
    } else {
        Ok(Target::Remove(value_t!(matches, "remove", u32)?))
    }
}

// Intermediate images take the extension of the final output.
fn step_path(dir: &Path, output: &Path, step: u32) -> PathBuf {
    let extension = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    dir.join(format!("step-{:04}.{}", step, extension))
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let input = Path::new(required(matches, "input")?);
    let output = Path::new(required(matches, "output")?);
    let target = target_of(matches)?;

    let image = load_image(input).with_context(|_| format!("cannot read {}", input.display()))?;
    // Validate before anything is computed or written.
    let newwidth = target.resolve(image.width())?;

    if let Some(path) = matches.value_of("grayscale") {
        save_image(&grayscale_image(&image), path)
            .with_context(|_| format!("cannot write {}", path))?;
    }

    let mut carver = SeamCarver::new(image);
    if matches.is_present("recompute-energy") {
        carver = carver.with_refresh(EnergyRefresh::Recompute);
    }

    if matches.is_present("energy") || matches.is_present("seams") {
        let picture = energy_to_image(carver.energy());
        if let Some(path) = matches.value_of("energy") {
            save_image(&picture, path).with_context(|_| format!("cannot write {}", path))?;
        }
        if let Some(path) = matches.value_of("seams") {
            let graph = SeamGraph::new(carver.energy());
            let seams = SeamSelector::new(&graph).candidates();
            save_image(&draw_seams(&picture, &seams), path)
                .with_context(|_| format!("cannot write {}", path))?;
        }
    }

    match matches.value_of("steps") {
        Some(dir) => {
            let dir = Path::new(dir);
            std::fs::create_dir_all(dir)
                .with_context(|_| format!("cannot create {}", dir.display()))?;
            carver.carve_with(Target::Width(newwidth), |step, image, _| {
                save_image(image, step_path(dir, output, step))
            })?;
        }
        None => carver.carve(Target::Width(newwidth))?,
    }

    save_image(carver.image(), output)
        .with_context(|_| format!("cannot write {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(err) = run(&matches) {
        eprintln!("sobelseam: {}", err);
        for cause in err.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        process::exit(1);
    }
}
