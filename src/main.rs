use anyhow::{Context, Result, bail};
use builder::{
    AttrValue, Child, attrs, children, class_names, classes, create_ref, create_root, fragment,
    from_html_string, get_all_elements, outlet, tags,
};
use clap::{Parser, Subcommand};
use dom::{Document, DomSnapshot, DomSnapshotOptions, Event, EventHandler, outline};
use mimalloc::MiMalloc;
use net::{FetchConfig, FetchOptions, fetch_json_with};
use std::time::Duration;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const OUTLINE_CAP: usize = 200;

#[derive(Parser)]
#[command(name = "just-dom")]
#[command(about = "Build, parse and inspect live element trees", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a sample page with the element builder and print it
    Demo {
        /// Print an indented outline instead of markup
        #[arg(long)]
        outline: bool,
    },

    /// Parse a markup fragment and print its node snapshot
    Parse {
        #[arg(value_name = "MARKUP")]
        markup: String,
    },

    /// Fetch a URL and pretty-print the JSON response
    Fetch {
        #[arg(value_name = "URL")]
        url: String,

        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// Request header as `name:value` (repeatable)
        #[arg(short = 'H', long = "header", value_name = "NAME:VALUE")]
        headers: Vec<String>,

        #[arg(short = 'd', long)]
        body: Option<String>,

        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Demo { outline } => run_demo(outline),
        Commands::Parse { markup } => {
            let root = from_html_string(&markup);
            let options = DomSnapshotOptions {
                skip_whitespace_text: true,
                ..DomSnapshotOptions::default()
            };
            println!("{}", DomSnapshot::new(&root, options));
            Ok(())
        }
        Commands::Fetch {
            url,
            method,
            headers,
            body,
            timeout_secs,
        } => run_fetch(&url, &method, &headers, body, timeout_secs),
    }
}

fn run_demo(as_outline: bool) -> Result<()> {
    let document = Document::new();
    let body = document.body().context("document has no body")?;
    body.append_child(&tags::div(attrs! { "id" => "app" }, ())?)?;

    let input = create_ref();
    let todos = ["write the parser", "wire the builder", "ship it"];
    let items: Vec<Child> = todos
        .iter()
        .enumerate()
        .map(|(i, todo)| {
            tags::li(
                attrs! {
                    "className" => classes!["todo", [("done", i == 0)]],
                    "dataIndex" => i.to_string(),
                },
                *todo,
            )
            .map(Child::from)
        })
        .collect::<Result<_, _>>()?;

    let counter = input.clone();
    let page = tags::main(
        attrs! { "className" => class_names([("page", true), ("dark", false)]) },
        children![
            tags::h1(attrs! { "style" => AttrValue::object([("fontSize", AttrValue::from(24))]) }, "Todos")?,
            tags::input(
                attrs! {
                    "ref" => &input,
                    "placeholder" => "What next?",
                    "autofocus" => AttrValue::presence(true),
                    "onKeyDown" => EventHandler::new(move |_: &Event| {
                        log::info!("key down on {:?}", counter.current().map(|n| n.node_name()));
                    }),
                },
                (),
            )?,
            tags::ul(attrs! { "className" => "todos" }, fragment(items)?)?,
            from_html_string("<p>Parsed <em>inline</em> markup.</p>"),
            outlet(None)?,
        ],
    )?;
    create_root(&document, "app", &page)?;

    if let Some(node) = input.current() {
        node.dispatch_event(&Event::new("keydown"));
    }
    log::debug!(
        "{} todo items mounted",
        get_all_elements(&document, "li.todo")?.len()
    );

    let root = document.node();
    if as_outline {
        for line in outline(root, OUTLINE_CAP) {
            println!("{line}");
        }
    } else {
        println!("{}", root.outer_html());
    }
    Ok(())
}

fn run_fetch(
    url: &str,
    method: &str,
    headers: &[String],
    body: Option<String>,
    timeout_secs: u64,
) -> Result<()> {
    let mut options = FetchOptions::default().method(method);
    for header in headers {
        let Some((name, value)) = header.split_once(':') else {
            bail!("header `{header}` is not in `name:value` form");
        };
        options = options.header(name.trim(), value.trim());
    }
    if let Some(body) = body {
        options = options.body(body);
    }
    let config = FetchConfig {
        timeout: Duration::from_secs(timeout_secs),
        ..FetchConfig::default()
    };
    let value = fetch_json_with(url, &options, &config).with_context(|| format!("{method} {url}"))?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
