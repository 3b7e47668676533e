use std::path::PathBuf;

use anyhow::Context;
use backend::SdlPlatform;
use clap::{Parser, ValueEnum};
use harness::{App, Config, FrameLimit, WindowConfig};
use log::info;

mod scenes;

use scenes::{AssetPolicy, DemoScene, LinesScene};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Scene {
    /// Shapes, text, an image and the cursor.
    Demo,
    /// A thousand lines of growing width.
    Lines,
}

#[derive(Parser, Debug)]
#[command(about = "Vector graphics in a native window", long_about = None)]
struct Args {
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    #[arg(long, default_value = "Vector Graphics Demo")]
    title: String,
    #[arg(long, value_enum, default_value_t = Scene::Demo)]
    scene: Scene,
    /// Directory holding the Roboto fonts and image2.jpg
    #[arg(long, default_value = "assets")]
    assets: PathBuf,
    /// Wait for the display refresh on every swap
    #[arg(long)]
    vsync: bool,
    /// Render at most this many frames per second
    #[arg(long, conflicts_with = "vsync", value_parser = clap::value_parser!(u32).range(1..))]
    fps: Option<u32>,
    /// Fail instead of skipping fonts and images that do not load
    #[arg(long)]
    strict_assets: bool,
}

impl Args {
    fn config(&self) -> Config {
        let frame_limit = match (self.vsync, self.fps) {
            (true, _) => FrameLimit::VSync,
            (false, Some(n)) => FrameLimit::Fps(n),
            (false, None) => FrameLimit::Unlimited,
        };
        Config {
            window: WindowConfig {
                width: self.width,
                height: self.height,
                title: self.title.clone(),
                ..Default::default()
            },
            frame_limit,
            ..Default::default()
        }
    }

    fn asset_policy(&self) -> AssetPolicy {
        if self.strict_assets {
            AssetPolicy::Strict
        } else {
            AssetPolicy::Fallback
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = args.config();
    info!(
        "starting '{:?}' scene, {}x{}, {:?}",
        args.scene, config.window.width, config.window.height, config.frame_limit
    );

    let mut app = App::new(SdlPlatform, config);
    match args.scene {
        Scene::Demo => {
            let mut scene = DemoScene::new(args.assets.clone(), args.asset_policy());
            app.run(&mut scene).context("demo scene failed")?;
        }
        Scene::Lines => {
            app.run(&mut LinesScene::default())
                .context("lines scene failed")?;
        }
    }
    info!("Process done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_config_defaults() {
        let args = Args::try_parse_from(["demo"]).unwrap();
        assert_eq!(args.config(), Config::default());
        assert_eq!(args.scene, Scene::Demo);
        assert_eq!(args.asset_policy(), AssetPolicy::Fallback);
    }

    #[test]
    fn frame_limit_flags() {
        let args = Args::try_parse_from(["demo", "--vsync"]).unwrap();
        assert_eq!(args.config().frame_limit, FrameLimit::VSync);

        let args = Args::try_parse_from(["demo", "--fps", "30", "--scene", "lines"]).unwrap();
        assert_eq!(args.config().frame_limit, FrameLimit::Fps(30));
        assert_eq!(args.scene, Scene::Lines);

        assert!(Args::try_parse_from(["demo", "--fps", "0"]).is_err());
        assert!(Args::try_parse_from(["demo", "--fps", "30", "--vsync"]).is_err());
    }

    #[test]
    fn window_flags() {
        let args = Args::try_parse_from([
            "demo",
            "--width",
            "640",
            "--height",
            "480",
            "--title",
            "lines",
            "--strict-assets",
        ])
        .unwrap();
        let config = args.config();
        assert_eq!((config.window.width, config.window.height), (640, 480));
        assert_eq!(config.window.title, "lines");
        assert_eq!(config.window.position, Some((0, 0)));
        assert_eq!(args.asset_policy(), AssetPolicy::Strict);
    }
}
