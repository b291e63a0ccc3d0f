use camino::{Utf8Path, Utf8PathBuf};
use miette::{IntoDiagnostic, WrapErr};
use pxstroke::svg;
use pxstroke::{Glyph, LineCap, LineJoin, SourceContext, StrokeStyle, parse_skeleton};
use rayon::prelude::*;
use std::fs;
use tracing::info;

/// Gap between glyphs in rendered documents, in skeleton units.
const SPACING: f64 = 1.0;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: cargo xtask <command> <path> [output]");
        eprintln!("Commands:");
        eprintln!("  render     Stroke a .skel file into an SVG document");
        eprintln!("  gallery    Render every .skel file in a directory with all join/cap combinations");
        std::process::exit(1);
    }

    let input = Utf8PathBuf::from(&args[2]);
    let output = args.get(3).map(Utf8PathBuf::from);
    match args[1].as_str() {
        "render" => render(&input, output),
        "gallery" => gallery(&input, output),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

fn read_skeleton(path: &Utf8Path) -> miette::Result<pxstroke::Skeleton> {
    let source = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {path}"))?;
    Ok(parse_skeleton(&SourceContext::new(path.as_str(), source))?)
}

/// Stroke every glyph in parallel, one glyph per task, sorted by name.
fn stroke_all(glyphs: &[Glyph], style: &StrokeStyle) -> miette::Result<Vec<Glyph>> {
    let mut outlines = glyphs
        .par_iter()
        .map(|glyph| glyph.vectorize(style))
        .collect::<Result<Vec<_>, _>>()?;
    outlines.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(outlines)
}

fn render(input: &Utf8Path, output: Option<Utf8PathBuf>) -> miette::Result<()> {
    let skeleton = read_skeleton(input)?;
    let outlines = stroke_all(&skeleton.glyphs, &skeleton.style)?;
    let document = svg::render_glyphs(&outlines, SPACING, skeleton.style.half_width());

    let output = output.unwrap_or_else(|| input.with_extension("svg"));
    fs::write(&output, document)
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {output}"))?;
    info!(glyphs = outlines.len(), %output, "rendered");
    eprintln!("Wrote {output}");
    Ok(())
}

/// One rendered cell of the gallery.
struct Cell {
    label: String,
    svg: Result<String, String>,
}

fn gallery(dir: &Utf8Path, output: Option<Utf8PathBuf>) -> miette::Result<()> {
    let mut files: Vec<Utf8PathBuf> = fs::read_dir(dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {dir}"))?
        .filter_map(|e| e.ok())
        .filter_map(|e| Utf8PathBuf::from_path_buf(e.path()).ok())
        .filter(|p| p.extension() == Some("skel"))
        .collect();
    files.sort();

    let mut sections = Vec::new();
    for file in &files {
        eprintln!("Processing {file}...");
        let skeleton = read_skeleton(file)?;

        let mut styles = Vec::new();
        for join in LineJoin::all() {
            for cap in LineCap::all() {
                styles.push(skeleton.style.with_join(join).with_cap(cap));
            }
        }

        let cells: Vec<Cell> = styles
            .par_iter()
            .map(|style| Cell {
                label: format!("{} / {}", style.join(), style.cap()),
                svg: stroke_all(&skeleton.glyphs, style)
                    .map(|outlines| svg::render_glyphs(&outlines, SPACING, style.half_width()))
                    .map_err(|e| e.to_string()),
            })
            .collect();
        sections.push((file.file_name().unwrap_or(file.as_str()).to_string(), cells));
    }

    let total: usize = sections.iter().map(|(_, cells)| cells.len()).sum();
    let failed: usize = sections
        .iter()
        .flat_map(|(_, cells)| cells)
        .filter(|c| c.svg.is_err())
        .count();

    let mut html = String::new();
    html.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Stroke gallery</title>
    <style>
        body { font-family: system-ui, sans-serif; margin: 24px; background: #eee; color: #333; }
        h2 { font-size: 16px; margin: 24px 0 8px; }
        .grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; }
        .cell { background: white; border-radius: 6px; padding: 8px; }
        .cell svg { width: 100%; height: 120px; }
        .label { font-size: 12px; color: #666; margin-bottom: 4px; }
        .error { color: #b00; font-family: monospace; font-size: 12px; white-space: pre-wrap; }
    </style>
</head>
<body>
"#,
    );
    html.push_str(&format!(
        "<h1>{} files, {} renders, {} failed</h1>\n",
        sections.len(),
        total,
        failed
    ));
    for (name, cells) in &sections {
        html.push_str(&format!("<h2>{}</h2>\n<div class=\"grid\">\n", html_escape(name)));
        for cell in cells {
            html.push_str("<div class=\"cell\">");
            html.push_str(&format!("<div class=\"label\">{}</div>", html_escape(&cell.label)));
            match &cell.svg {
                Ok(svg) => html.push_str(svg),
                Err(e) => html.push_str(&format!("<div class=\"error\">{}</div>", html_escape(e))),
            }
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");
    }
    html.push_str("</body>\n</html>\n");

    let output = output.unwrap_or_else(|| dir.join("gallery.html"));
    fs::write(&output, html)
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {output}"))?;

    info!(files = sections.len(), total, failed, "gallery written");
    eprintln!("Wrote {output} ({total} renders, {failed} failed)");
    Ok(())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
