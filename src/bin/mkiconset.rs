use std::path::Path;

use aicon::icon::{self, IconError, IconSpec};

const OUT_DIR: &str = "assets/icons";
const SIZES: [u32; 6] = [16, 32, 64, 128, 256, 512];

fn main() {
    env_logger::init();
    println!("Generating application icon set...");
    let out_dir = Path::new(OUT_DIR);
    let mut failures = 0usize;

    for size in SIZES {
        println!("Rendering {size}x{size} icon...");
        let path = out_dir.join(format!("icon-{size}x{size}.png"));
        match render_to(size, &path) {
            Ok(()) => println!("  ✓ saved {}", path.display()),
            Err(e) => {
                failures += 1;
                log::error!("{size}x{size}: {e}");
                println!("  ✗ failed to generate {size}x{size}: {e}");
            }
        }
    }

    // Canonical full-size copy alongside the per-size files.
    println!("Rendering main icon (512x512)...");
    let main_path = out_dir.join("icon.png");
    match render_to(512, &main_path) {
        Ok(()) => println!("  ✓ saved {}", main_path.display()),
        Err(e) => {
            failures += 1;
            log::error!("main icon: {e}");
            println!("  ✗ failed to generate main icon: {e}");
        }
    }

    println!();
    if failures == 0 {
        println!("✅ Icon set complete");
    } else {
        println!("⚠ Icon set finished with {failures} failure(s)");
    }
    println!("Output directory: {}", out_dir.display());
    println!();
    println!("Note:");
    println!("- The PNG icons are ready to use as-is");
    println!("- ICO (Windows) requires an external converter such as ImageMagick");
    println!("- ICNS (macOS) requires iconutil or another external tool");
}

fn render_to(size: u32, path: &Path) -> Result<(), IconError> {
    let img = icon::render(IconSpec::with_border(size))?;
    icon::write_icon(&img, path)
}
