use super::context::{
    is_truthy, PickerOrigin, PickerState, QueryPickerContext, DEFAULT_SEARCH_CAPTION,
    PICKER_FORM_TITLE, PICKER_GRID_ID, SEARCH_EDIT_ID, SEARCH_LABEL_ID,
};
use super::filter::{build_filtered_statement, substitute_placeholder};
use crate::forms::FieldContext;
use crate::shared::errors::MapperError;
use crate::store::{DataStore, QueryResult, Statement};
use crate::ui::{Bounds, FormSpec, HostUi, ItemKind, ItemSpec};

const PICKER_WIDTH: i32 = 550;
const PICKER_HEIGHT: i32 = 400;

pub fn open(
    host: &mut dyn HostUi,
    store: &dyn DataStore,
    form_id: &str,
    origin_form: &str,
    field: &FieldContext,
) -> Result<Option<QueryPickerContext>, MapperError> {
    let Some(base_query) = field
        .lookup_query
        .as_deref()
        .filter(|query| !query.trim().is_empty())
    else {
        return Ok(None);
    };

    host.create_form(FormSpec {
        id: form_id.to_string(),
        title: PICKER_FORM_TITLE.to_string(),
        bounds: Bounds::new(200, 120, PICKER_WIDTH, PICKER_HEIGHT),
        sizable: true,
        parent: Some(origin_form.to_string()),
    })?;

    match populate(host, store, form_id, base_query) {
        Ok(filter_column) => Ok(Some(QueryPickerContext {
            form_id: form_id.to_string(),
            base_query: base_query.to_string(),
            filter_column,
            origin: PickerOrigin {
                form_id: origin_form.to_string(),
                value_item: field.value_item.clone(),
            },
            state: PickerState::Opened,
        })),
        Err(err) => {
            let _ = host.close_form(form_id);
            Err(err)
        }
    }
}

fn populate(
    host: &mut dyn HostUi,
    store: &dyn DataStore,
    form_id: &str,
    base_query: &str,
) -> Result<Option<String>, MapperError> {
    host.add_item(
        form_id,
        ItemSpec::new(SEARCH_LABEL_ID, ItemKind::Label, Bounds::new(10, 10, 500, 15))
            .caption(DEFAULT_SEARCH_CAPTION),
    )?;
    host.add_item(
        form_id,
        ItemSpec::new(SEARCH_EDIT_ID, ItemKind::Edit, Bounds::new(10, 26, 500, 15)),
    )?;
    host.add_item(
        form_id,
        ItemSpec::new(PICKER_GRID_ID, ItemKind::Grid, Bounds::new(10, 46, 500, 294)).disabled(),
    )?;

    let result = store.query(&Statement::new(base_query))?;
    let filter_column = result.columns.first().cloned();
    let caption = search_caption(&result, filter_column.as_deref());
    host.bind_grid(form_id, PICKER_GRID_ID, result)?;
    host.set_caption(form_id, SEARCH_LABEL_ID, &caption)?;
    Ok(filter_column)
}

pub fn search_caption(result: &QueryResult, column: Option<&str>) -> String {
    column
        .and_then(|name| result.column_index(name))
        .and_then(|index| result.columns.get(index))
        .map(|name| format!("Search by: {name}"))
        .unwrap_or_else(|| DEFAULT_SEARCH_CAPTION.to_string())
}

pub fn select_column(
    host: &mut dyn HostUi,
    store: &dyn DataStore,
    context: &mut QueryPickerContext,
    column: &str,
) -> Result<(), MapperError> {
    if column.trim().is_empty() || context.state.is_terminal() {
        return Ok(());
    }
    context.filter_column = Some(column.to_string());
    refresh(host, store, context)
}

pub fn refresh(
    host: &mut dyn HostUi,
    store: &dyn DataStore,
    context: &mut QueryPickerContext,
) -> Result<(), MapperError> {
    if context.state.is_terminal() {
        return Ok(());
    }
    let substring = if host.has_item(&context.form_id, SEARCH_EDIT_ID) {
        host.text(&context.form_id, SEARCH_EDIT_ID)?
    } else {
        String::new()
    };

    let statement = build_filtered_statement(
        store.dialect(),
        &context.base_query,
        context.filter_column.as_deref(),
        &substring,
    );
    let result = store.query(&statement)?;
    let caption = search_caption(&result, context.filter_column.as_deref());
    host.bind_grid(&context.form_id, PICKER_GRID_ID, result)?;
    if host.has_item(&context.form_id, SEARCH_LABEL_ID) {
        host.set_caption(&context.form_id, SEARCH_LABEL_ID, &caption)?;
    }
    context.state = context.state.on_search();
    Ok(())
}

// Returns false when the row does not resolve to a value and nothing was written.
pub fn apply_selection(
    host: &mut dyn HostUi,
    store: &dyn DataStore,
    context: &mut QueryPickerContext,
    field: Option<&FieldContext>,
    row: usize,
) -> Result<bool, MapperError> {
    if context.state.is_terminal() {
        return Ok(false);
    }
    let grid = host.grid(&context.form_id, PICKER_GRID_ID)?;
    let Some(selected) = grid.first_value(row).map(str::to_string) else {
        return Ok(false);
    };

    let origin = &context.origin;
    match field {
        Some(field) if field.is_checkbox() => {
            host.set_checked(&origin.form_id, &origin.value_item, is_truthy(&selected))?
        }
        _ => host.set_text(&origin.form_id, &origin.value_item, &selected)?,
    }

    if let Some(field) = field {
        write_description(host, store, &origin.form_id, field, &selected)?;
    }

    context.state = context.state.on_select();
    let _ = host.close_form(&context.form_id);
    context.state = context.state.on_close();
    Ok(true)
}

fn write_description(
    host: &mut dyn HostUi,
    store: &dyn DataStore,
    origin_form: &str,
    field: &FieldContext,
    selected: &str,
) -> Result<(), MapperError> {
    let (Some(item), Some(query)) = (&field.description_item, &field.description_query) else {
        return Ok(());
    };
    if !host.has_item(origin_form, item) {
        return Ok(());
    }
    let Some(statement) = substitute_placeholder(query, selected) else {
        return Ok(());
    };
    let description = store.scalar(&statement)?.unwrap_or_default();
    host.set_text(origin_form, item, &description)?;
    Ok(())
}
