use crate::CLAP_STYLING;
use clap::{arg, command};
use graphlens_core::html::{DEFAULT_OUTPUT_FILE, DEFAULT_TITLE};
use graphlens_core::translate::DEFAULT_LABEL_ATTRIBUTE;
use graphlens_server::{DEFAULT_BIND, DEFAULT_FRONTEND_DIR};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("graphlens")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("graphlens")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("render")
                .about(
                    "Render a GEXF graph as a self-contained Cytoscape.js HTML page with a \
                force-directed layout.",
                )
                .arg(
                    arg!(<GEXF_FILE>)
                        .required(true)
                        .help("Path to the input GEXF file"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Path to save the output HTML file")
                        .default_value(DEFAULT_OUTPUT_FILE),
                )
                .arg(
                    arg!(--"label-attr" <NAME>)
                        .required(false)
                        .help("Node attribute to use as the display label")
                        .default_value(DEFAULT_LABEL_ATTRIBUTE),
                )
                .arg(
                    arg!(--"title" <TEXT>)
                        .required(false)
                        .help("Title of the generated page")
                        .default_value(DEFAULT_TITLE),
                ),
        )
        .subcommand(
            command!("serve")
                .about(
                    "Serve graph elements over HTTP at POST /graph_vis and the built frontend \
                under /app.",
                )
                .arg(
                    arg!(-b --"bind" <ADDR>)
                        .required(false)
                        .help("Address to listen on")
                        .value_parser(clap::value_parser!(std::net::SocketAddr))
                        .default_value(DEFAULT_BIND),
                )
                .arg(
                    arg!(--"frontend-dir" <DIR>)
                        .required(false)
                        .help("Directory holding the built frontend")
                        .default_value(DEFAULT_FRONTEND_DIR),
                )
                .arg(
                    arg!(--"label-attr" <NAME>)
                        .required(false)
                        .help("Node attribute to use as the display label")
                        .default_value(DEFAULT_LABEL_ATTRIBUTE),
                ),
        )
}
