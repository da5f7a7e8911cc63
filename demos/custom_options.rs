//! Strict header sets and content-only rendering.
//!
//! Run with: cargo run --example custom_options

use pto_scan::{from_str, from_str_with_options, to_string_with_options, HeaderSet};
use pto_scan::{RenderOptions, ScanOptions};
use std::error::Error;

const SCRIPT: &str = "\
# generated by a stitcher
p f2 w3000 h1500 v360 n\"TIFF_m c:LZW\"
q private=1
i w800 h600 f0 n\"a.jpg\"

#hugin_blender enblend
*
anything after the sentinel
";

fn main() -> Result<(), Box<dyn Error>> {
    // Default: every ASCII letter starts a data line
    let liberal = from_str(SCRIPT)?;
    println!("Liberal: {} 'q' lines", liberal.lines_with_header("q").len());

    // Strict: only p v i m o z c k; the 'q' line is kept verbatim
    let strict = from_str_with_options(SCRIPT, ScanOptions::strict())?;
    println!("Strict: {} 'q' lines", strict.lines_with_header("q").len());

    // Custom header set, comment extensions left as plain comments
    let options = ScanOptions::new()
        .with_accepted_headers(HeaderSet::only("pi"))
        .with_extensions(false);
    let custom = from_str_with_options(SCRIPT, options)?;
    println!("Custom ({}):", custom.options().accepted_headers);
    println!("{}", to_string_with_options(&custom, RenderOptions::new())?);

    // Content only: comments, blanks and the sentinel trailer are dropped
    println!("Content only:");
    print!(
        "{}",
        to_string_with_options(&strict, RenderOptions::content_only())?
    );

    Ok(())
}
