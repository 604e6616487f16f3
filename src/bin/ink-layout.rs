use std::env;
use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;

use ink_layout::{
    FlowSession, HeuristicWidthProvider, Hyphenator, LayoutConfig, LayoutEngine, Line,
    ParagraphStyle, TextAlign, WordStyle,
};

const DEFAULT_WIDTH_PX: i32 = 464;
const DEFAULT_SIZE_PX: f32 = 16.0;
const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Clone, Debug)]
struct Args {
    input_path: Option<String>,
    width_px: i32,
    size_px: f32,
    language: String,
    alignment: TextAlign,
    hyphenation: bool,
    chunk_words: Option<usize>,
    json: bool,
}

fn main() -> ExitCode {
    match run(env::args().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("{}", help_text());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let cli = parse_args(args)?;

    let mut text = String::new();
    match &cli.input_path {
        Some(path) => {
            text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
        }
        None => {
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("stdin: {}", e))?;
        }
    }

    let mut cfg = LayoutConfig::for_page_width(cli.width_px)
        .with_hyphenation(cli.hyphenation)
        .with_default_alignment(cli.alignment);
    if let Some(chunk) = cli.chunk_words {
        cfg.max_buffered_words = chunk;
    }
    let engine = LayoutEngine::new(cfg).with_hyphenator(Hyphenator::for_language(&cli.language));
    let mut session = FlowSession::new(engine, HeuristicWidthProvider::new(cli.size_px));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_err: Option<io::Error> = None;
    let mut emit = |line: Line| {
        if write_err.is_some() {
            return;
        }
        if let Err(e) = write_line(&mut out, &line, cli.json) {
            write_err = Some(e);
        }
    };

    for paragraph in paragraphs(&text) {
        session.begin_paragraph(ParagraphStyle::default());
        for word in paragraph.split_whitespace() {
            session.add_word_with_lines(word, WordStyle::REGULAR, false, &mut emit);
        }
        session.end_paragraph_with_lines(&mut emit);
    }
    let stats = session.finish(&mut emit);

    if let Some(e) = write_err {
        return Err(format!("stdout: {}", e));
    }
    out.flush().map_err(|e| format!("stdout: {}", e))?;
    eprintln!(
        "paragraphs={} lines={} chunk_flushes={} peak_buffered_words={}",
        stats.paragraphs, stats.lines, stats.chunk_flushes, stats.peak_buffered_words
    );
    Ok(())
}

/// Blank-line separated blocks with any non-whitespace content.
fn paragraphs(text: &str) -> impl Iterator<Item = String> + '_ {
    let mut current = String::new();
    let mut lines = text.lines();
    std::iter::from_fn(move || loop {
        match lines.next() {
            Some(line) if line.trim().is_empty() => {
                if !current.trim().is_empty() {
                    return Some(std::mem::take(&mut current));
                }
                current.clear();
            }
            Some(line) => {
                current.push_str(line);
                current.push('\n');
            }
            None => {
                if current.trim().is_empty() {
                    return None;
                }
                return Some(std::mem::take(&mut current));
            }
        }
    })
}

fn write_line<W: Write>(out: &mut W, line: &Line, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, line).map_err(io::Error::other)?;
        return writeln!(out);
    }
    for (idx, word) in line.words.iter().enumerate() {
        if idx > 0 {
            write!(out, " ")?;
        }
        write!(out, "{}:{}", word.x_px, word.text)?;
    }
    writeln!(out)?;
    if line.is_last_line {
        writeln!(out)?;
    }
    Ok(())
}

fn parse_alignment(value: &str) -> Option<TextAlign> {
    match value.to_ascii_lowercase().as_str() {
        "justify" => Some(TextAlign::Justify),
        "left" => Some(TextAlign::Left),
        "center" | "centre" => Some(TextAlign::Center),
        "right" => Some(TextAlign::Right),
        _ => None,
    }
}

fn parse_args(args: Vec<String>) -> Result<Args, String> {
    let mut cfg = Args {
        input_path: None,
        width_px: DEFAULT_WIDTH_PX,
        size_px: DEFAULT_SIZE_PX,
        language: DEFAULT_LANGUAGE.to_string(),
        alignment: TextAlign::Justify,
        hyphenation: true,
        chunk_words: None,
        json: false,
    };

    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Err("help requested".to_string()),
            "--width" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--width requires a value".to_string())?;
                cfg.width_px = v
                    .parse::<i32>()
                    .ok()
                    .filter(|w| *w > 0)
                    .ok_or_else(|| format!("invalid --width value '{}'", v))?;
                i += 2;
            }
            "--size" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--size requires a value".to_string())?;
                cfg.size_px = v
                    .parse::<f32>()
                    .ok()
                    .filter(|s| s.is_finite() && *s > 0.0)
                    .ok_or_else(|| format!("invalid --size value '{}'", v))?;
                i += 2;
            }
            "--lang" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--lang requires a value".to_string())?;
                cfg.language = v.clone();
                i += 2;
            }
            "--align" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--align requires a value".to_string())?;
                cfg.alignment =
                    parse_alignment(v).ok_or_else(|| format!("invalid --align value '{}'", v))?;
                i += 2;
            }
            "--no-hyphenation" => {
                cfg.hyphenation = false;
                i += 1;
            }
            "--chunk" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--chunk requires a value".to_string())?;
                cfg.chunk_words = Some(
                    v.parse::<usize>()
                        .map_err(|_| format!("invalid --chunk value '{}'", v))?,
                );
                i += 2;
            }
            "--json" => {
                cfg.json = true;
                i += 1;
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option '{}'", other));
            }
            other => {
                if cfg.input_path.is_some() {
                    return Err(format!("unexpected argument '{}'", other));
                }
                cfg.input_path = Some(other.to_string());
                i += 1;
            }
        }
    }
    Ok(cfg)
}

fn help_text() -> &'static str {
    r#"ink-layout - lay out plain text into positioned lines

USAGE:
  ink-layout [options] [file]

Reads stdin when no file is given. Paragraphs are separated by blank lines.

OPTIONS:
  --width <px>          line width (default: 464)
  --size <px>           nominal font size for the width heuristic (default: 16)
  --lang <tag>          hyphenation language (default: en-US)
  --align <mode>        justify | left | center | right (default: justify)
  --no-hyphenation      break lines without hyphenating words
  --chunk <words>       flush threshold for long paragraphs (default: 750)
  --json                print one JSON object per line
  -h, --help            show this help"#
}
