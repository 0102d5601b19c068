use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use skyview_common::SkyboxVariant;
use skyview_input::{InputEvent, InputHandler, Key, KeyState};
use skyview_kernel::SceneContext;
use skyview_render::{CubemapImages, DebugTextRenderer, Renderer, face_paths};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skyview-cli", about = "CLI tool for skyview asset checks and headless runs")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Decode every skybox's six faces and report problems
    Validate {
        /// Directory holding one sub-directory of face images per skybox
        #[arg(long, default_value = "./textures")]
        assets: PathBuf,
        /// Face image file extension
        #[arg(long, default_value = "tga")]
        ext: String,
    },
    /// Drive the scene headlessly with a scripted input sequence
    Simulate {
        /// Number of frames to step
        #[arg(short, long, default_value = "120")]
        frames: u32,
        /// Tap space every this many frames (0 disables cycling)
        #[arg(short, long, default_value = "30")]
        cycle_every: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("skyview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", skyview_common::crate_info());
            println!("render: {}", skyview_render::crate_info());
            println!("input: {}", skyview_input::crate_info());
            let variants: Vec<String> =
                SkyboxVariant::ALL.iter().map(|v| v.to_string()).collect();
            println!("skyboxes: {}", variants.join(", "));
        }
        Commands::Validate { assets, ext } => {
            let mut failures = 0;
            for variant in SkyboxVariant::ALL {
                let paths = face_paths(&assets, variant, &ext);
                match CubemapImages::load(&paths) {
                    Ok(images) => {
                        println!("{variant}: ok ({0}x{0} faces)", images.size());
                    }
                    Err(e) => {
                        println!("{variant}: {e}");
                        failures += 1;
                    }
                }
            }
            if failures > 0 {
                bail!("{failures} of {} skyboxes failed to load", SkyboxVariant::COUNT);
            }
        }
        Commands::Simulate {
            frames,
            cycle_every,
            dt,
        } => {
            println!("Headless run: frames={frames}, cycle_every={cycle_every}, dt={dt}");

            let renderer = DebugTextRenderer::new();
            let mut scene = SceneContext::default();

            // fly forward while turning slowly to the right
            scene.on_event(&key(Key::W, KeyState::Pressed));
            scene.on_event(&InputEvent::CursorMoved { x: 0.0, y: 0.0 });

            for frame in 1..=frames {
                scene.on_event(&InputEvent::CursorMoved {
                    x: f64::from(frame),
                    y: 0.0,
                });

                let tap = cycle_every > 0 && frame % cycle_every == 0;
                if tap {
                    scene.on_event(&key(Key::Space, KeyState::Pressed));
                }
                scene.step(dt);
                if tap {
                    scene.on_event(&key(Key::Space, KeyState::Released));
                    print!("frame {frame}: {}", renderer.render(&scene.render_view()));
                }
            }

            print!("final: {}", renderer.render(&scene.render_view()));
            println!("cycles: {}", scene.cycles());
        }
    }

    Ok(())
}

fn key(key: Key, state: KeyState) -> InputEvent {
    InputEvent::Key { key, state }
}
