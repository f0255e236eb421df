//! Market-specific instruction prompts.

use crate::emphasis::DELIMITER;
use crate::market::Market;

const SWISS_TEMPLATE: &str = "You are a Swiss beverage label compliance expert ({regulation}).

Current label: {label}

Generate a COMPLETE Swiss beverage label that replaces the current one. Use {delim}text{delim} for bold. Format exactly like:
{delim}Savanna Cidre - Alkoholisches Getränk auf Apfelweinbasis{delim}

Zutaten: ..., Konservierungsstoff: {delim}SULFITE{delim}

{delim}Alkoholgehalt:{delim} X% vol. {delim}Nettofüllmenge:{delim} Xml

{delim}Hergestellt in Country{delim} {delim}Importeur:{delim} Name Address

Phone

{delim}Mindestens haltbar bis:{delim} info {delim}Losnummer:{delim} info

Include both {languages}. Make {delim}bold{delim} the product name, section headers, allergens in CAPITALS, and important info. \
The label must fit on the bottle: at most {max_lines} non-empty lines. Reply with the label text only.";

const EU_TEMPLATE: &str = "You are an EU beverage label compliance expert ({regulation}).

Current label: {label}

Generate a COMPLETE EU beverage label that replaces the current one. Use {delim}text{delim} for bold. Format exactly like:
{delim}Savanna Cider - Alcoholic Beverage Based on Apple Cider{delim}

Ingredients: ..., Preservative: {delim}SULFITE{delim}

{delim}Alcohol content:{delim} X% vol. {delim}Net volume:{delim} Xml

{delim}Manufactured in Country{delim} {delim}Importer:{delim} Name Address

Phone

{delim}Best before:{delim} info {delim}Batch code:{delim} info

In {languages}. Make {delim}bold{delim} the product name, section headers, allergens in CAPITALS, and important info. \
The label must fit on the bottle: at most {max_lines} non-empty lines. Reply with the label text only.";

fn template(market: Market) -> &'static str {
    match market {
        Market::Switzerland => SWISS_TEMPLATE,
        Market::Eu => EU_TEMPLATE,
    }
}

/// Build the instruction prompt for `market` around the caller's label text.
///
/// The label is substituted last so placeholders inside user text stay literal.
pub fn build_prompt(market: Market, label: &str, max_lines: usize) -> String {
    let languages = match market.languages() {
        [single] => single.to_string(),
        [first, second] => format!("{} and {}", first, second),
        many => many.join(", "),
    };

    template(market)
        .replace("{regulation}", market.regulation())
        .replace("{delim}", DELIMITER)
        .replace("{languages}", &languages)
        .replace("{max_lines}", &max_lines.to_string())
        .replace("{label}", label)
}
