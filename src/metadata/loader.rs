use super::definition::{
    flag_is_active, flag_is_set, non_blank, ParameterDefinition, ParameterType, ReportEntry,
};
use crate::shared::logging::LogSink;
use crate::store::{DataStore, DataStoreError, QueryResult, SqlDialect, Statement};

pub const PARAM_HEADER_TABLE: &str = "@SS_PRM_CAB";
pub const PARAM_LINE_TABLE: &str = "@SS_PRM_DET";

pub const REPORT_CODE_COLUMN: &str = "U_SS_IDRPT";
pub const REPORT_NAME_COLUMN: &str = "U_SS_NOMBRPT";
pub const DEPARTMENT_COLUMN: &str = "U_SS_IDDPT";

const LINE_COLUMNS: [&str; 10] = [
    "LineId",
    "U_SS_IDPARAM",
    "U_SS_DSCPARAM",
    "U_SS_TIPO",
    "U_SS_OBLIGA",
    "U_SS_QUERY",
    "U_SS_DESC",
    "U_SS_QUERYD",
    "U_SS_ACTIVO",
    "U_SS_TPPRM",
];

pub fn parameters_statement(dialect: SqlDialect, report_code: &str) -> Statement {
    let q = |name: &str| dialect.quote_identifier(name);
    let columns = LINE_COLUMNS
        .iter()
        .map(|column| format!("T1.{}", q(column)))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "select {columns} from {header} T0 inner join {line} T1 on T0.{code} = T1.{code} \
         where T0.{report} = ? order by T1.{line_id}",
        header = q(PARAM_HEADER_TABLE),
        line = q(PARAM_LINE_TABLE),
        code = q("Code"),
        report = q(REPORT_CODE_COLUMN),
        line_id = q("LineId"),
    );
    Statement::new(sql).bind(report_code)
}

pub fn load(store: &dyn DataStore, log: &dyn LogSink, report_code: &str) -> Vec<ParameterDefinition> {
    if report_code.trim().is_empty() {
        return Vec::new();
    }
    match try_load(store, report_code) {
        Ok(definitions) => definitions,
        Err(err) => {
            log.error(
                "metadata.load.failed",
                &format!("failed to load parameters for report `{report_code}`"),
                &err,
            );
            Vec::new()
        }
    }
}

pub fn try_load(
    store: &dyn DataStore,
    report_code: &str,
) -> Result<Vec<ParameterDefinition>, DataStoreError> {
    let result = store.query(&parameters_statement(store.dialect(), report_code))?;
    let mut definitions = Vec::new();
    for row in 0..result.rows.len() {
        let cell = |column: &str| result.value(row, column).unwrap_or_default();
        if !flag_is_active(cell("U_SS_ACTIVO")) {
            continue;
        }
        definitions.push(definition_from_row(&result, row));
    }
    definitions.sort_by_key(|definition| definition.ordinal);
    Ok(definitions)
}

fn definition_from_row(result: &QueryResult, row: usize) -> ParameterDefinition {
    let cell = |column: &str| result.value(row, column).unwrap_or_default();
    ParameterDefinition {
        id: cell("U_SS_IDPARAM").trim().to_string(),
        description: cell("U_SS_DSCPARAM").to_string(),
        param_type: ParameterType::parse(cell("U_SS_TIPO")),
        required: flag_is_set(cell("U_SS_OBLIGA")),
        lookup_query: non_blank(cell("U_SS_QUERY")),
        show_description: flag_is_set(cell("U_SS_DESC")),
        description_query: non_blank(cell("U_SS_QUERYD")),
        ordinal: cell("LineId").trim().parse().unwrap_or(row as i64),
        multiplicity: non_blank(cell("U_SS_TPPRM")),
    }
}

pub fn reports_statement(dialect: SqlDialect, department: Option<&str>) -> Statement {
    let q = |name: &str| dialect.quote_identifier(name);
    let mut sql = format!(
        "select T2.{code}, T2.{name} from {header} T2",
        code = q(REPORT_CODE_COLUMN),
        name = q(REPORT_NAME_COLUMN),
        header = q(PARAM_HEADER_TABLE),
    );
    let department = department.map(str::trim).filter(|value| !value.is_empty());
    if department.is_some() {
        sql.push_str(&format!(" where T2.{} = ?", q(DEPARTMENT_COLUMN)));
    }
    sql.push_str(&format!(" order by T2.{}", q(REPORT_CODE_COLUMN)));

    let statement = Statement::new(sql);
    match department {
        Some(value) => statement.bind(value),
        None => statement,
    }
}

pub fn list_reports(
    store: &dyn DataStore,
    department: Option<&str>,
) -> Result<Vec<ReportEntry>, DataStoreError> {
    let result = store.query(&reports_statement(store.dialect(), department))?;
    Ok((0..result.rows.len())
        .map(|row| ReportEntry {
            code: result
                .value(row, REPORT_CODE_COLUMN)
                .unwrap_or_default()
                .to_string(),
            name: result
                .value(row, REPORT_NAME_COLUMN)
                .unwrap_or_default()
                .to_string(),
        })
        .filter(|entry| !entry.code.trim().is_empty())
        .collect())
}
