// econdata-core/src/domain/transform/mod.rs
//
// One reusable transform, configured per dataset:
// Parse -> Project/Rename -> Derive -> Coerce -> Filter essentials -> Emit.

pub mod coerce;
pub mod parse;

use tracing::{debug, info, instrument, warn};

use crate::domain::bundle::RawBundle;
use crate::domain::dates;
use crate::domain::error::DomainError;
use crate::domain::metadata::DatasetMetadata;
use crate::domain::table::Table;
use crate::domain::validation::ValidationSpec;

pub use coerce::{ColumnKind, DateLayout};
pub use parse::{ParseMode, RawFrame};

/// Where a mapped column is read from in the raw frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceColumn {
    Named(String),
    Position(usize),
}

/// Copies one source column into the working frame under `target`.
/// A missing optional source is skipped with a warning; a missing required
/// source fails the transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub source: SourceColumn,
    pub target: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derivation {
    /// `target = "{year}-{month zero-padded to 2}"`, null if either part is null.
    ComposeMonth {
        year: String,
        month: String,
        target: String,
    },
    /// Cells equal to `sentinel` become null.
    NullSentinel { column: String, sentinel: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputColumn {
    pub name: String,
    pub kind: ColumnKind,
}

/// Text columns between projection and coercion.
#[derive(Debug, Default)]
struct WorkFrame {
    rows: usize,
    columns: Vec<(String, Vec<Option<String>>)>,
}

impl WorkFrame {
    fn get(&self, name: &str) -> Option<&Vec<Option<String>>> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Vec<Option<String>>> {
        self.columns
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    fn set(&mut self, name: &str, values: Vec<Option<String>>) {
        match self.get_mut(name) {
            Some(existing) => *existing = values,
            None => self.columns.push((name.to_string(), values)),
        }
    }
}

/// Result of a transform: the typed table plus its publishable descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    pub table: Table,
    pub metadata: DatasetMetadata,
    pub rows_read: usize,
    pub rows_dropped: usize,
}

/// Declarative description of a dataset transform.
#[derive(Debug, Clone)]
pub struct TransformRecipe {
    pub id: String,
    pub source_key: String,
    pub parse_mode: ParseMode,
    pub null_tokens: Vec<String>,
    pub mappings: Vec<ColumnMapping>,
    pub derivations: Vec<Derivation>,
    pub outputs: Vec<OutputColumn>,
    pub essential: Vec<String>,
    pub metadata: DatasetMetadata,
    validation: fn() -> ValidationSpec,
}

impl TransformRecipe {
    pub fn builder(id: &str, source_key: &str) -> RecipeBuilder {
        RecipeBuilder::new(id, source_key)
    }

    /// Fresh validation spec for one run.
    pub fn validation_spec(&self) -> ValidationSpec {
        (self.validation)()
    }

    /// Runs every stage against the bundle. Pure: the same bundle always
    /// yields the same table.
    #[instrument(skip_all, fields(dataset = %self.id))]
    pub fn apply(&self, bundle: &RawBundle) -> Result<TransformOutput, DomainError> {
        let raw = bundle.require(&self.source_key)?;

        let frame = parse::parse(raw, &self.parse_mode).map_err(|e| DomainError::MalformedData {
            dataset: self.id.clone(),
            column: "*".to_string(),
            row: e.position().map_or(0, |p| p.line() as usize),
            value: String::new(),
            reason: format!("is not readable CSV ({})", e),
        })?;
        debug!(rows = frame.num_rows(), headers = ?frame.headers, "Parsed raw source");

        let mut work = self.project(&frame)?;
        self.derive(&mut work)?;
        let table = self.coerce(&work)?;
        let (table, rows_dropped) = self.filter_essential(table);

        info!(rows = table.num_rows(), dropped = rows_dropped, "Transform complete");

        Ok(TransformOutput {
            table,
            metadata: self.metadata.clone(),
            rows_read: frame.num_rows(),
            rows_dropped,
        })
    }

    fn project(&self, frame: &RawFrame) -> Result<WorkFrame, DomainError> {
        let mut work = WorkFrame {
            rows: frame.num_rows(),
            columns: Vec::with_capacity(self.mappings.len()),
        };

        for mapping in &self.mappings {
            let index = match &mapping.source {
                SourceColumn::Named(name) => frame.position_of(name),
                SourceColumn::Position(i) => (*i < frame.headers.len()).then_some(*i),
            };

            let Some(index) = index else {
                if mapping.required {
                    return Err(DomainError::SchemaError(format!(
                        "{}: source column {:?} not found (headers: {:?})",
                        self.id, mapping.source, frame.headers
                    )));
                }
                warn!(source = ?mapping.source, target = %mapping.target, "Optional source column absent, skipping");
                continue;
            };

            let values = (0..frame.num_rows())
                .map(|row| {
                    frame
                        .cell(row, index)
                        .filter(|cell| !self.null_tokens.iter().any(|t| t.as_str() == *cell))
                        .map(str::to_string)
                })
                .collect();
            work.set(&mapping.target, values);
        }

        Ok(work)
    }

    fn derive(&self, work: &mut WorkFrame) -> Result<(), DomainError> {
        for derivation in &self.derivations {
            match derivation {
                Derivation::ComposeMonth {
                    year,
                    month,
                    target,
                } => {
                    let (Some(years), Some(months)) = (work.get(year), work.get(month)) else {
                        return Err(DomainError::SchemaError(format!(
                            "{}: cannot compose '{}' without '{}' and '{}'",
                            self.id, target, year, month
                        )));
                    };
                    let composed = years
                        .iter()
                        .zip(months)
                        .map(|(y, m)| match (non_blank(y), non_blank(m)) {
                            (Some(y), Some(m)) => Some(dates::compose_month(y, m)),
                            _ => None,
                        })
                        .collect();
                    work.set(target, composed);
                }
                Derivation::NullSentinel { column, sentinel } => {
                    if let Some(values) = work.get_mut(column) {
                        for cell in values.iter_mut() {
                            if cell.as_deref().map(str::trim) == Some(sentinel.as_str()) {
                                *cell = None;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn coerce(&self, work: &WorkFrame) -> Result<Table, DomainError> {
        let mut table = Table::new();
        for output in &self.outputs {
            let Some(values) = work.get(&output.name) else {
                continue;
            };
            let data = coerce::coerce(values, output.kind).map_err(|f| {
                DomainError::MalformedData {
                    dataset: self.id.clone(),
                    column: output.name.clone(),
                    row: f.row + 1,
                    value: f.value,
                    reason: f.reason,
                }
            })?;
            table.push_column(output.name.clone(), data)?;
        }
        if table.num_columns() > 0 && table.num_rows() != work.rows {
            return Err(DomainError::SchemaError(format!(
                "{}: coerced {} rows out of {}",
                self.id,
                table.num_rows(),
                work.rows
            )));
        }
        Ok(table)
    }

    fn filter_essential(&self, table: Table) -> (Table, usize) {
        let essentials: Vec<_> = self
            .essential
            .iter()
            .filter_map(|name| table.column(name))
            .collect();
        if essentials.is_empty() {
            return (table, 0);
        }

        let mask: Vec<bool> = (0..table.num_rows())
            .map(|row| essentials.iter().all(|c| !c.data.is_null(row)))
            .collect();
        let dropped = mask.iter().filter(|keep| !**keep).count();
        if dropped == 0 {
            return (table, 0);
        }
        debug!(dropped, essential = ?self.essential, "Dropping rows with null essential fields");
        (table.filter(&mask), dropped)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Fluent construction of a [`TransformRecipe`].
pub struct RecipeBuilder {
    id: String,
    source_key: String,
    parse_mode: ParseMode,
    null_tokens: Vec<String>,
    mappings: Vec<ColumnMapping>,
    derivations: Vec<Derivation>,
    outputs: Vec<OutputColumn>,
    essential: Vec<String>,
    metadata: Option<DatasetMetadata>,
    validation: Option<fn() -> ValidationSpec>,
}

impl RecipeBuilder {
    fn new(id: &str, source_key: &str) -> Self {
        Self {
            id: id.to_string(),
            source_key: source_key.to_string(),
            parse_mode: ParseMode::Headered,
            null_tokens: Vec::new(),
            mappings: Vec::new(),
            derivations: Vec::new(),
            outputs: Vec::new(),
            essential: Vec::new(),
            metadata: None,
            validation: None,
        }
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    pub fn null_tokens(mut self, tokens: &[&str]) -> Self {
        self.null_tokens = tokens.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Required column, read by header name.
    pub fn map(self, source: &str, target: &str) -> Self {
        self.mapping(SourceColumn::Named(source.to_string()), target, true)
    }

    /// Column that upstream may drop without notice.
    pub fn map_optional(self, source: &str, target: &str) -> Self {
        self.mapping(SourceColumn::Named(source.to_string()), target, false)
    }

    /// Required column, read by position.
    pub fn map_position(self, index: usize, target: &str) -> Self {
        self.mapping(SourceColumn::Position(index), target, true)
    }

    fn mapping(mut self, source: SourceColumn, target: &str, required: bool) -> Self {
        self.mappings.push(ColumnMapping {
            source,
            target: target.to_string(),
            required,
        });
        self
    }

    pub fn derive(mut self, derivation: Derivation) -> Self {
        self.derivations.push(derivation);
        self
    }

    pub fn output(mut self, name: &str, kind: ColumnKind) -> Self {
        self.outputs.push(OutputColumn {
            name: name.to_string(),
            kind,
        });
        self
    }

    pub fn essential(mut self, columns: &[&str]) -> Self {
        self.essential = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn metadata(mut self, metadata: DatasetMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn validation(mut self, spec: fn() -> ValidationSpec) -> Self {
        self.validation = Some(spec);
        self
    }

    pub fn build(self) -> Result<TransformRecipe, DomainError> {
        let metadata = self.metadata.ok_or_else(|| {
            DomainError::SchemaError(format!("recipe '{}' has no metadata", self.id))
        })?;
        let validation = self.validation.ok_or_else(|| {
            DomainError::SchemaError(format!("recipe '{}' has no validation spec", self.id))
        })?;
        if self.outputs.is_empty() {
            return Err(DomainError::SchemaError(format!(
                "recipe '{}' declares no output columns",
                self.id
            )));
        }
        if let Some(unknown) = self
            .essential
            .iter()
            .find(|e| !self.outputs.iter().any(|o| &o.name == *e))
        {
            return Err(DomainError::SchemaError(format!(
                "recipe '{}': essential column '{}' is not an output",
                self.id, unknown
            )));
        }

        Ok(TransformRecipe {
            id: self.id,
            source_key: self.source_key,
            parse_mode: self.parse_mode,
            null_tokens: self.null_tokens,
            mappings: self.mappings,
            derivations: self.derivations,
            outputs: self.outputs,
            essential: self.essential,
            metadata,
            validation,
        })
    }
}
