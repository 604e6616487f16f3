//! DHAT heap profiler for ink-layout.
//!
//! Profiles allocation patterns of paragraph layout, comparing a whole
//! paragraph laid out in one call with the chunked flow session.
//!
//! Usage:
//!   cargo run -p ink-layout-heap-profile --release -- [OPTIONS] [TEXT_FILES...]
//!
//! Outputs dhat-<phase>.json files in the output directory (default: target/memory).
//! Open in https://nnethercote.github.io/dh_view/dh_view.html

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::path::PathBuf;

use ink_layout::{
    FlowSession, Hyphenator, LayoutConfig, LayoutEngine, ParagraphBuffer, ParagraphStyle,
    WordStyle,
};
use ink_layout_embedded_graphics::MonoFontMeasurer;

const DISPLAY_WIDTH: i32 = 464;
const DEFAULT_SYNTHETIC_WORDS: usize = 20_000;

const VOCABULARY: &[&str] = &[
    "the",
    "reader",
    "turned",
    "another",
    "page",
    "of",
    "characteristically",
    "unremarkable",
    "prose",
    "while",
    "representation",
    "and",
    "international",
    "accessibility",
    "kept",
    "arriving",
    "in",
    "paragraphs",
    "without",
    "end,",
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Whole paragraph buffered, then one layout call.
    Oneshot,
    /// Flow session flushing every `max_buffered_words`.
    Chunked,
}

impl Phase {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "oneshot" | "one-shot" => Some(Self::Oneshot),
            "chunked" => Some(Self::Chunked),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Oneshot => "oneshot",
            Self::Chunked => "chunked",
        }
    }
}

fn synthetic_words(count: usize) -> Vec<String> {
    let mut state = 0x2545_f491_u32;
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            VOCABULARY[state as usize % VOCABULARY.len()].to_string()
        })
        .collect()
}

fn engine() -> LayoutEngine {
    LayoutEngine::new(LayoutConfig {
        font_id: MonoFontMeasurer::SIZE_MEDIUM,
        ..LayoutConfig::for_page_width(DISPLAY_WIDTH)
    })
    .with_hyphenator(Hyphenator::for_language("en-US"))
}

fn profile_words(words: &[String], phase: Phase) -> usize {
    let mut lines = 0usize;
    match phase {
        Phase::Oneshot => {
            let mut engine = engine();
            let mut paragraph = ParagraphBuffer::new(ParagraphStyle::default(), true);
            for word in words {
                paragraph.add_word(word.as_str(), WordStyle::REGULAR);
            }
            while !paragraph.is_empty() {
                let emitted =
                    engine.layout_paragraph(&mut paragraph, &MonoFontMeasurer, true, |_| {
                        lines += 1;
                    });
                if emitted == 0 {
                    break;
                }
            }
        }
        Phase::Chunked => {
            let mut session = FlowSession::new(engine(), MonoFontMeasurer);
            session.begin_paragraph(ParagraphStyle::default());
            for word in words {
                session.add_word_with_lines(word.as_str(), WordStyle::REGULAR, false, |_| {
                    lines += 1;
                });
            }
            let stats = session.finish(|_| lines += 1);
            eprintln!(
                "  chunk flushes={} peak buffered words={}",
                stats.chunk_flushes, stats.peak_buffered_words
            );
        }
    }
    lines
}

fn usage() {
    eprintln!("Usage: heap-profile [OPTIONS] [TEXT_FILES...]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --phase <oneshot|chunked>  Layout path to profile (default: chunked)");
    eprintln!("  --words <N>                Synthetic paragraph length (default: 20000)");
    eprintln!("  --out-dir <DIR>            Output directory for dhat JSON (default: target/memory)");
    eprintln!();
    eprintln!("Each text file is laid out as a single paragraph. Without files a");
    eprintln!("synthetic paragraph is generated.");
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut phase = Phase::Chunked;
    let mut out_dir = PathBuf::from("target/memory");
    let mut synthetic = DEFAULT_SYNTHETIC_WORDS;
    let mut files: Vec<PathBuf> = Vec::with_capacity(8);
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--phase" => {
                i += 1;
                phase = args
                    .get(i)
                    .and_then(|value| Phase::from_str(value))
                    .unwrap_or_else(|| {
                        eprintln!("Unknown phase: {:?}", args.get(i));
                        usage();
                        std::process::exit(1);
                    });
            }
            "--words" => {
                i += 1;
                synthetic = args
                    .get(i)
                    .and_then(|value| value.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--words expects a number");
                        std::process::exit(1);
                    });
            }
            "--out-dir" => {
                i += 1;
                out_dir = args.get(i).map(PathBuf::from).unwrap_or_else(|| {
                    eprintln!("--out-dir expects a directory");
                    std::process::exit(1);
                });
            }
            "--help" | "-h" => {
                usage();
                std::process::exit(0);
            }
            other => files.push(PathBuf::from(other)),
        }
        i += 1;
    }

    let mut inputs: Vec<(String, Vec<String>)> = Vec::with_capacity(files.len().max(1));
    for file in &files {
        let text = std::fs::read_to_string(file).unwrap_or_else(|e| {
            eprintln!("Failed to read {}: {}", file.display(), e);
            std::process::exit(1);
        });
        let words = text.split_whitespace().map(str::to_string).collect();
        inputs.push((file.display().to_string(), words));
    }
    if inputs.is_empty() {
        inputs.push((
            format!("synthetic-{synthetic}"),
            synthetic_words(synthetic),
        ));
    }

    std::fs::create_dir_all(&out_dir).unwrap_or_else(|e| {
        eprintln!("Failed to create output dir {}: {}", out_dir.display(), e);
        std::process::exit(1);
    });

    let phase_name = phase.name();
    let json_path = out_dir.join(format!("dhat-{phase_name}.json"));
    eprintln!(
        "heap-profile: phase={}, inputs={}, out={}",
        phase_name,
        inputs.len(),
        out_dir.display()
    );

    let _profiler = dhat::Profiler::builder()
        .file_name(json_path.clone())
        .build();

    for (name, words) in &inputs {
        eprintln!("  profiling: {} ({} words)", name, words.len());
        let lines = profile_words(words, phase);
        eprintln!("  lines={}", lines);
    }

    // _profiler drops here, writes JSON
    eprintln!(
        "Done. Open {} in https://nnethercote.github.io/dh_view/dh_view.html",
        json_path.display()
    );
}
