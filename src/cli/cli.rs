use clap::{builder, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction, Command};

pub const COLOR_MODES: &[&str] = &["24bit", "off", "auto"];
pub const FORMATS: &[&str] = &["text", "json", "html"];

fn policy_args() -> Vec<Arg> {
    vec![
        Arg::new("config")
            .long("config")
            .short('c')
            .value_name("FILE")
            .value_parser(value_parser!(std::path::PathBuf))
            .help("Read settings from a TOML file (flags take precedence)"),
        Arg::new("target")
            .long("target")
            .short('t')
            .value_name("RATIO")
            .value_parser(value_parser!(f64))
            .help("Contrast ratio a suggestion has to reach [default: 4.5]"),
        Arg::new("step")
            .long("step")
            .value_name("AMOUNT")
            .value_parser(value_parser!(f64))
            .help("OKLCH lightness change per search step [default: 0.1]"),
        Arg::new("bound")
            .long("bound")
            .value_name("AMOUNT")
            .value_parser(value_parser!(f64))
            .help("Largest lightness change explored in each direction [default: 0.5]"),
        Arg::new("max-suggestions")
            .long("max-suggestions")
            .short('n')
            .value_name("COUNT")
            .value_parser(value_parser!(usize))
            .help("Keep at most COUNT suggestions per pair, 0 keeps all [default: 2]"),
        Arg::new("foreground")
            .long("foreground")
            .action(ArgAction::SetTrue)
            .conflicts_with("no-foreground")
            .help("Suggest foreground adjustments (the default)"),
        Arg::new("no-foreground")
            .long("no-foreground")
            .action(ArgAction::SetTrue)
            .help("Never suggest foreground adjustments"),
        Arg::new("no-background")
            .long("no-background")
            .action(ArgAction::SetTrue)
            .help("Never suggest background adjustments"),
        Arg::new("template")
            .long("template")
            .value_name("FILE")
            .value_parser(value_parser!(std::path::PathBuf))
            .help("HTML template with a {{ report }} placeholder"),
    ]
}

pub fn build_cli() -> Command {
    let pair_arg_help = "Color pairs in the form FG/BG or FG/BG/LABEL, where FG and BG are \
         six-digit hex colors such as '#1a2b3c' or 1a2b3c. If no pair is given, a JSON \
         array of {foreground, background, element} objects is read from standard input.";

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .color(clap::ColorChoice::Auto)
        .dont_collapse_args_in_usage(true)
        .max_term_width(100)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("check")
                .about("Check color pairs against WCAG contrast rules")
                .long_about(color_print::cstr!(
                    "Check foreground/background color pairs against the WCAG 2.0 contrast \
                     thresholds and suggest lighter or darker alternatives for failing pairs.\n\
                     \n\
                     The exit status is 0 when every pair passes AA for normal text, 1 when \
                     at least one pair fails and 2 on invalid input.\n\n\
                     <green,bold>Examples:</>\
                     \n  <cyan,bold>contrast-checker check 777777/888888/body '#000000/#ffffff'</>\
                     \n  <cyan,bold>contrast-checker check --input pairs.json --format html > report.html</>"
                ))
                .arg(
                    Arg::new("pair")
                        .help(pair_arg_help)
                        .value_name("PAIR")
                        .action(ArgAction::Append)
                        .num_args(0..)
                        .conflicts_with("input"),
                )
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .value_name("FILE")
                        .value_parser(value_parser!(std::path::PathBuf))
                        .help("Read the JSON pair list from FILE instead of standard input"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_name("FORMAT")
                        .value_parser(builder::PossibleValuesParser::new(FORMATS))
                        .ignore_case(true)
                        .help("Output format: text, json or html [default: text on a terminal, json otherwise]"),
                )
                .args(policy_args()),
        )
        .subcommand(
            Command::new("contrast")
                .about("Show the contrast ratio of a single pair")
                .long_about(color_print::cstr!(
                    "Print the WCAG contrast ratio between two colors and the levels it meets.\n\n\
                     <green,bold>Example:</>\
                     \n  <cyan,bold>contrast-checker contrast 777777 '#ffffff'</>"
                ))
                .arg(
                    Arg::new("foreground")
                        .help("The foreground (text) color")
                        .value_name("FG")
                        .required(true),
                )
                .arg(
                    Arg::new("background")
                        .help("The background color")
                        .value_name("BG")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("serve")
                .about("Run the MCP server on standard input/output")
                .long_about(color_print::cstr!(
                    "Serve the <bold>check_color_accessibility</> tool over the Model Context \
                     Protocol on standard input/output. Logs are written to standard error.\n\
                     \n\
                     Requires a build with the '<cyan,bold>mcp</>' feature."
                ))
                .args(policy_args()),
        )
        .arg(
            Arg::new("color-mode")
                .long("color-mode")
                .short('m')
                .value_name("MODE")
                .help("Specify the terminal color mode: 24bit, off, *auto*")
                .value_parser(builder::PossibleValuesParser::new(COLOR_MODES))
                .default_value(if output_vt100::try_init().is_ok() { "auto" } else { "off" })
                .hide_possible_values(true)
                .hide_default_value(true)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true)
                .help("Log more to standard error (-v info, -vv debug)"),
        )
}

#[test]
fn verify_cmd() {
    build_cli().debug_assert();
}
