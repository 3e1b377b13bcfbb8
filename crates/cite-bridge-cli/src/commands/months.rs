//! Months command implementation.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use cite_bridge::BridgeConfig;
use cite_bridge::locale::{
    BundledLocales, DirectoryLocaleSource, LocaleSource, MonthForm, MonthNameResolver, MonthNames,
};

/// Arguments for the months command
#[derive(Debug)]
pub struct MonthsArgs {
    /// Requested locale
    pub locale: Option<String>,
    /// Month form name
    pub form: String,
    /// Locale directory; bundled locales when absent
    pub locales_dir: Option<PathBuf>,
}

/// Execute the months command
pub fn execute(args: MonthsArgs, config: &BridgeConfig) -> Result<()> {
    let form: MonthForm = args.form.parse()?;
    let names = match &args.locales_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Reading locales from directory");
            lookup(DirectoryLocaleSource::new(dir), config, form, args.locale.as_deref())?
        }
        None => lookup(BundledLocales, config, form, args.locale.as_deref())?,
    };

    print!("{}", render_table(&names));
    Ok(())
}

fn lookup<S: LocaleSource>(
    source: S,
    config: &BridgeConfig,
    form: MonthForm,
    locale: Option<&str>,
) -> Result<MonthNames> {
    let mut resolver = MonthNameResolver::from_config(source, config);
    Ok(resolver.month_names(form, locale)?)
}

fn render_table(names: &MonthNames) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{:>2}  {}\n", i + 1, name.as_deref().unwrap_or("-")))
        .collect()
}
