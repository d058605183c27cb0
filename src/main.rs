//! Desktop viewer for the tinsel particle scene.
//!
//! Usage: `tinsel [options.toml] [photo ...]`

use std::path::Path;

use tinsel::options::Options;
use tinsel::Viewer;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let mut args = std::env::args().skip(1).peekable();
    let options = match args.next_if(|a| a.ends_with(".toml")) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(opts) => opts,
            Err(e) => {
                log::warn!("ignoring {path}: {e}");
                Options::default()
            }
        },
        None => Options::default(),
    };

    let mut builder = Viewer::builder().with_options(options);
    for photo in args {
        builder = builder.with_photo(photo);
    }
    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
