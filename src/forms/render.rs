use super::layout::{
    field_ids, form_height, generate_button_bounds, header_bounds, row_layout, FORM_LEFT,
    FORM_TOP, FORM_WIDTH, GENERATE_BUTTON_CAPTION, GENERATE_BUTTON_ID, HEADER_LABEL_ID,
    LOOKUP_BUTTON_CAPTION, MAPPING_FORM_TITLE, MIN_FORM_HEIGHT,
};
use super::session::{header_caption, ControlKind, FieldContext, MappingFormSession};
use super::values::encode_date;
use crate::metadata::{ParameterDefinition, ParameterType};
use crate::ui::{Bounds, FormSpec, HostUi, ItemKind, ItemSpec, UiError};
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub form_id: &'a str,
    pub parent_form: Option<&'a str>,
    pub report_code: &'a str,
    pub report_name: &'a str,
    pub definitions: Vec<ParameterDefinition>,
    pub today: NaiveDate,
}

pub fn render(
    host: &mut dyn HostUi,
    request: RenderRequest<'_>,
) -> Result<MappingFormSession, UiError> {
    host.create_form(FormSpec {
        id: request.form_id.to_string(),
        title: MAPPING_FORM_TITLE.to_string(),
        bounds: Bounds::new(FORM_LEFT, FORM_TOP, FORM_WIDTH, MIN_FORM_HEIGHT),
        sizable: false,
        parent: request.parent_form.map(str::to_string),
    })?;

    match populate(host, &request) {
        Ok(session) => Ok(session),
        Err(err) => {
            let _ = host.close_form(request.form_id);
            Err(err)
        }
    }
}

fn populate(
    host: &mut dyn HostUi,
    request: &RenderRequest<'_>,
) -> Result<MappingFormSession, UiError> {
    let form_id = request.form_id;
    host.add_item(
        form_id,
        ItemSpec::new(HEADER_LABEL_ID, ItemKind::Label, header_bounds())
            .caption(&header_caption(request.report_code, request.report_name)),
    )?;

    let mut fields = Vec::with_capacity(request.definitions.len());
    let mut lowest_value_bottom = None;
    let mut lowest_bottom = header_bounds().bottom();

    for (index, definition) in request.definitions.iter().enumerate() {
        let ids = field_ids(index);
        let checkbox = definition.param_type == ParameterType::Boolean;
        let lookup = definition.has_lookup();
        let description = definition.has_description_control();
        let row = row_layout(index, checkbox, lookup, description);

        host.add_item(
            form_id,
            ItemSpec::new(&ids.label, ItemKind::Label, row.label)
                .caption(definition.display_name()),
        )?;

        let value_kind = if checkbox {
            ItemKind::CheckBox
        } else {
            ItemKind::Edit
        };
        host.add_item(form_id, ItemSpec::new(&ids.value, value_kind, row.value))?;
        match definition.param_type {
            ParameterType::Boolean => host.set_checked(form_id, &ids.value, false)?,
            ParameterType::Date => host.set_text(form_id, &ids.value, &encode_date(request.today))?,
            ParameterType::Number | ParameterType::Text => host.set_text(form_id, &ids.value, "")?,
        }

        if let Some(bounds) = row.lookup {
            host.add_item(
                form_id,
                ItemSpec::new(&ids.lookup, ItemKind::Button, bounds).caption(LOOKUP_BUTTON_CAPTION),
            )?;
        }
        if let Some(bounds) = row.description {
            host.add_item(
                form_id,
                ItemSpec::new(&ids.description, ItemKind::Edit, bounds).disabled(),
            )?;
        }

        lowest_value_bottom = lowest_value_bottom.max(Some(row.value.bottom()));
        lowest_bottom = lowest_bottom.max(row.bottom());

        fields.push(FieldContext {
            param_id: definition.id.clone(),
            display_name: definition.display_name().to_string(),
            param_type: definition.param_type,
            required: definition.required,
            value_item: ids.value,
            lookup_item: lookup.then_some(ids.lookup),
            description_item: description.then_some(ids.description),
            lookup_query: definition.lookup_query.clone(),
            description_query: definition.description_query.clone(),
            control: if checkbox {
                ControlKind::CheckBox
            } else {
                ControlKind::Text
            },
        });
    }

    let generate = generate_button_bounds(lowest_value_bottom);
    host.add_item(
        form_id,
        ItemSpec::new(GENERATE_BUTTON_ID, ItemKind::Button, generate)
            .caption(GENERATE_BUTTON_CAPTION),
    )?;
    lowest_bottom = lowest_bottom.max(generate.bottom());

    let height = form_height(lowest_bottom);
    host.resize_form(form_id, FORM_WIDTH, height)?;

    Ok(MappingFormSession {
        form_id: form_id.to_string(),
        report_code: request.report_code.to_string(),
        report_name: request.report_name.to_string(),
        definitions: request.definitions.clone(),
        fields,
        generate_item: GENERATE_BUTTON_ID.to_string(),
        height,
    })
}
