use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "segtran")]
#[command(about = "Translate documents segment by segment in the terminal")]
#[command(
    long_about = "Translate documents segment by segment in the terminal.\n\n\
                  Reads languages from languages.txt and documents from documents/ \
                  in the working directory, and writes translations/<name>_<language>.<ext>. \
                  Paths and the backend endpoint are set in ~/.config/segtran/config.toml."
)]
#[command(version)]
pub struct Args {}
