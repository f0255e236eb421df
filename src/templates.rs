use tera::Tera;

use crate::error::AppError;

/// Initialize the Tera template engine from `glob`
pub fn init_templates(glob: &str) -> Result<Tera, AppError> {
    let mut tera = Tera::new(glob)?;
    tera.register_filter("languages", languages_filter);
    Ok(tera)
}

/// Join a list of language names for display ("German and French")
fn languages_filter(
    value: &tera::Value,
    _args: &std::collections::HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let items = value
        .as_array()
        .ok_or_else(|| tera::Error::msg("languages filter expects an array"))?;

    let names: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
    let joined = match names.as_slice() {
        [] => String::new(),
        [single] => single.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    };

    Ok(tera::Value::String(joined))
}
