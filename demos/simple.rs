//! Scan a project script, edit one field and render it back.
//!
//! Run with: cargo run --example simple

use pto_scan::{from_str, to_string, Value};
use std::error::Error;

const SCRIPT: &str = "\
# hugin project file
p f2 w3000 h1500 v360 E0 R0 n\"TIFF_m c:LZW\"
#-hugin cropFactor=1
i w2816 h2112 f0 v50 Ra0 Eev0 r0 p0 y0 n\"PA030369.JPG\"
#-hugin cropFactor=1
i w2816 h2112 f0 v=0 Ra=0 Eev0 r0 p0 y45.5 n\"PA030370.JPG\"
c n0 N1 x1377.45 y1164.17 X340.289 Y1153.71 t0
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = from_str(SCRIPT)?;

    for image in doc.lines_with_header("i") {
        println!(
            "line {}: {} yaw {}",
            image.number(),
            image.value("n").and_then(Value::as_str).unwrap_or("?"),
            image.value("y").map_or("-".to_string(), |v| v.to_string())
        );
    }

    // Unedited scripts in canonical spelling render byte-for-byte
    assert_eq!(to_string(&doc)?, SCRIPT);
    println!("✓ Round-trip successful");

    let second = doc.lines_with_header("i")[1].number();
    if let Some(yaw) = doc.lines_mut()[second].member_mut("y") {
        yaw.set_value(Value::Float(90.0));
    }
    println!("\nAfter edit:\n{}", to_string(&doc)?);

    Ok(())
}
