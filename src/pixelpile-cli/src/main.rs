// This file is part of Pixelpile.
// Copyright (C) 2026 The Pixelpile developers
//
// Pixelpile is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// As additional permission under section 7, you are allowed to distribute
// the software through an app store, even if that store has restrictive
// terms and conditions that are incompatible with the GPL, provided that
// the source is also available under the GPL with or without this permission
// through a channel without those restrictive terms and conditions.
//
// Pixelpile is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Pixelpile.  If not, see <https://www.gnu.org/licenses/>.

use clap::{Args, Parser, Subcommand};
use tracing::Level;

use pixelpile_cli::info::print_info;
use pixelpile_cli::renderer::*;
use pxcore::view::{MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL};

#[derive(Parser)]
#[clap(version, about)]
struct Cli {
    /// Print debug messages
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ViewArgs {
    /// Zoom level. The image is scaled by 2^zoom
    #[clap(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    zoom: f64,

    /// Lowest allowed zoom level
    #[clap(long, default_value_t = MIN_ZOOM_LEVEL, allow_negative_numbers = true)]
    min_zoom: f64,

    /// Highest allowed zoom level
    #[clap(long, default_value_t = MAX_ZOOM_LEVEL, allow_negative_numbers = true)]
    max_zoom: f64,

    /// Device pixel ratio
    #[clap(long, default_value_t = 1.0)]
    dpr: f64,
}

impl ViewArgs {
    fn opts(&self) -> ViewOpts {
        ViewOpts {
            zoom: self.zoom,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            device_pixel_ratio: self.dpr,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the canvas size, palette and layers of a document
    Info {
        /// Input file
        #[clap(value_parser)]
        input: String,
    },
    /// Render a document to a PNG image
    Render {
        /// Input file
        #[clap(value_parser)]
        input: String,

        /// Output file
        #[clap(value_parser)]
        output: Option<String>,

        #[clap(flatten)]
        view: ViewArgs,
    },
    /// Move a layer in the stack and render the result
    Move {
        /// Input file
        #[clap(value_parser)]
        input: String,

        /// Stacking index of the layer to move (0 is the topmost layer)
        #[clap(value_parser)]
        layer: usize,

        /// New stacking index
        #[clap(value_parser)]
        to: usize,

        /// Output file
        #[clap(value_parser)]
        output: Option<String>,

        #[clap(flatten)]
        view: ViewArgs,
    },
    /// Hide a layer and render the result
    Hide {
        /// Input file
        #[clap(value_parser)]
        input: String,

        /// Stacking index of the layer to hide (0 is the topmost layer)
        #[clap(value_parser)]
        layer: usize,

        /// Output file
        #[clap(value_parser)]
        output: Option<String>,

        #[clap(flatten)]
        view: ViewArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info { input } => print_info(&input),
        Commands::Render {
            input,
            output,
            view,
        } => render_document(&RenderOpts {
            input_file: &input,
            output_file: output.as_deref(),
            view: view.opts(),
            edit: Edit::None,
        }),
        Commands::Move {
            input,
            layer,
            to,
            output,
            view,
        } => render_document(&RenderOpts {
            input_file: &input,
            output_file: output.as_deref(),
            view: view.opts(),
            edit: Edit::Move { layer, to },
        }),
        Commands::Hide {
            input,
            layer,
            output,
            view,
        } => render_document(&RenderOpts {
            input_file: &input,
            output_file: output.as_deref(),
            view: view.opts(),
            edit: Edit::Hide { layer },
        }),
    }
}
