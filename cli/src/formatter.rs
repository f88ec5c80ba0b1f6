use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use rust_decimal::Decimal;
use takeoff::{Parameter, Project, ProjectRegistry, Value};

/// Outcome of one payload in a batch run
pub struct BatchEntry {
    pub file: String,
    pub project_type: Option<String>,
    pub result: Result<Decimal, Vec<String>>,
}

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_project(&self, project: &Project, raw: bool) -> String {
        if raw {
            return format!("{}\n", project.to_json());
        }

        let mut output = format!("Project: {}\n", project.project_type());

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Parameter").set_alignment(CellAlignment::Left),
            Cell::new("Value").set_alignment(CellAlignment::Right),
            Cell::new("Units").set_alignment(CellAlignment::Left),
            Cell::new("Source").set_alignment(CellAlignment::Left),
        ]));

        for param in project.required_parameters() {
            table.add_row(self.parameter_row(param, "required"));
        }
        for param in project.calculated_parameters() {
            table.add_row(self.parameter_row(param, "calculated"));
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    fn parameter_row(&self, param: &Parameter, kind: &str) -> Row {
        let source = if param.forced {
            "forced".to_string()
        } else if kind == "required" {
            "default".to_string()
        } else {
            "derived".to_string()
        };
        Row::from(vec![
            Cell::new(&param.name),
            Cell::new(format_value(&param.value)).set_alignment(CellAlignment::Right),
            Cell::new(&param.units),
            Cell::new(source),
        ])
    }

    pub fn format_types(&self, registry: &ProjectRegistry) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Type"),
            Cell::new("Required"),
            Cell::new("Calculated"),
        ]));

        for name in registry.project_types() {
            let Some(declaration) = registry.declaration(name) else {
                continue;
            };
            let describe = |descriptors: &[takeoff::Descriptor]| {
                descriptors
                    .iter()
                    .map(|d| format!("{} ({})", d.name, d.units))
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            table.add_row(Row::from(vec![
                Cell::new(name),
                Cell::new(describe(declaration.required())),
                Cell::new(describe(declaration.calculated())),
            ]));
        }

        format!("{}\n", table)
    }

    pub fn format_co2(&self, project: &Project, co2: Decimal, raw: bool) -> String {
        if raw {
            return format!("{}\n", co2.normalize());
        }
        format!(
            "{}: {} tons CO2\n",
            project.project_type(),
            format_number(co2)
        )
    }

    pub fn format_query(&self, target: &str, values: &[Value]) -> String {
        if values.is_empty() {
            return format!("{} = ?\n", target);
        }
        let rendered: Vec<String> = values.iter().map(format_value).collect();
        format!("{} = {}\n", target, rendered.join(", "))
    }

    pub fn format_batch_summary(&self, entries: &[BatchEntry]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("File"),
            Cell::new("Type"),
            Cell::new("CO2 (tons)").set_alignment(CellAlignment::Right),
            Cell::new("Status"),
        ]));

        let mut failed = 0;
        for entry in entries {
            let (co2, status) = match &entry.result {
                Ok(co2) => (format_number(*co2), "ok".to_string()),
                Err(messages) => {
                    failed += 1;
                    ("-".to_string(), messages.join("\n"))
                }
            };
            table.add_row(Row::from(vec![
                Cell::new(&entry.file),
                Cell::new(entry.project_type.as_deref().unwrap_or("?")),
                Cell::new(co2).set_alignment(CellAlignment::Right),
                Cell::new(status),
            ]));
        }

        format!(
            "Batch contains {} payloads, {} failed\n\n{}\n",
            entries.len(),
            failed,
            table
        )
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Number(n) => format_number(*n),
        Value::Text(s) => s.clone(),
        Value::Null => "?".to_string(),
    }
}

/// Round to two decimals and group the integer part with `_`
pub fn format_number(n: Decimal) -> String {
    let rounded = n.round_dp(2).normalize();
    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('_');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}
