use std::{collections::HashMap, path::PathBuf};

use clap::{CommandFactory, FromArgMatches, Parser};
use switchshapes::{
    condition::DEFAULT_SUFFIX,
    filters::{cli_to_filter, filter_group, FontFilter},
    load, switch_shapes, BracketLayerReport, SwitchOptions, SwitchShapesError,
};

/// Turn bracket layers into alternate glyphs, feature code and export parameters
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Font source to read (.babelfont or .json)
    input: PathBuf,

    /// Where to save the result; the input is overwritten if not given
    output: Option<PathBuf>,

    /// Suffix for the alternate glyphs
    #[arg(short, long, default_value = DEFAULT_SUFFIX)]
    suffix: String,

    /// Do not write rlig and rvrn feature code
    #[arg(long)]
    no_feature_code: bool,

    /// Do not add Remove Glyphs and Rename Glyphs parameters to instances
    #[arg(long)]
    no_export_parameters: bool,

    /// Remove the bracket layers from the original glyphs afterwards
    #[arg(long)]
    erase_bracket_layers: bool,

    /// Do not print a glyph listing of the created alternates
    #[arg(long)]
    no_overview: bool,

    /// Only list the glyphs with bracket layers and the glyphs using them
    #[arg(long)]
    report: bool,

    /// Also write the font's feature code to this feature file
    #[arg(long, value_name = "FEA")]
    fea: Option<PathBuf>,

    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity<clap_verbosity_flag::WarnLevel>,
}

impl Args {
    fn options(&self) -> Result<SwitchOptions, SwitchShapesError> {
        let mut options = SwitchOptions::new(&self.suffix)?;
        options.generate_feature_code = !self.no_feature_code;
        options.add_export_parameters = !self.no_export_parameters;
        options.erase_bracket_layers = self.erase_bracket_layers;
        options.open_overview = !self.no_overview;
        Ok(options)
    }
}

fn main() {
    // Extend with the font filter arguments
    let matches = filter_group(Args::command()).get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    env_logger::Builder::new()
        .filter_level(args.verbosity.into())
        .init();

    if let Err(e) = run(&args, &matches) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args, matches: &clap::ArgMatches) -> Result<(), SwitchShapesError> {
    let filters = filters_in_order(matches)?;
    let options = args.options()?;

    log::info!("Loading {}", args.input.display());
    let mut font = load(&args.input)?;

    if args.report {
        let report = BracketLayerReport::from_font(&font);
        println!("{}\n\n{}", report, report.listing());
        return Ok(());
    }

    let report = switch_shapes(&mut font, &options)?;
    println!("{}", report);
    if let Some(overview) = &report.overview {
        println!("\n{}", overview);
    }

    if !filters.is_empty() {
        log::info!("Applying filters...");
        let before_filters = std::time::Instant::now();
        for filter in filters {
            filter.apply(&mut font)?;
        }
        log::info!("Applied filters in {:.2?}", before_filters.elapsed());
    }

    if let Some(fea) = &args.fea {
        log::info!("Writing feature code to {}", fea.display());
        std::fs::write(fea, font.features.to_fea())?;
    }

    let output = args.output.as_ref().unwrap_or(&args.input);
    log::info!("Saving {}", output.display());
    font.save(output)
}

fn filters_in_order(
    matches: &clap::ArgMatches,
) -> Result<Vec<Box<dyn FontFilter>>, SwitchShapesError> {
    // Clap stores --foo 1 --bar 2 --foo 3 as "foo": ["1", "3"], "bar": ["2"],
    // losing the original order, but we can regain that order by looking at
    // the raw occurrences of the "filters" arg group.
    let Some(filter_group) = matches.get_raw("filters") else {
        return Ok(vec![]);
    };
    let mut counter: HashMap<String, usize> = HashMap::new();
    let mut filters: Vec<Box<dyn FontFilter>> = vec![];
    for filter in filter_group {
        let name = filter.to_string_lossy().to_string();
        let count = counter.entry(name.clone()).or_insert(0);
        // Get the count'th occurrence of this filter
        let value = matches
            .get_raw_occurrences(&name)
            .and_then(|mut occurrences| occurrences.nth(*count))
            .map(|values| {
                values
                    .map(|v| v.to_string_lossy().to_string())
                    .collect::<String>()
            })
            .unwrap_or_default();
        *count += 1;
        filters.push(cli_to_filter(&name, &value)?);
    }
    Ok(filters)
}
