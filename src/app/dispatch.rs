use super::mapper::ParameterMapper;
use crate::routing::{HostEvent, Route};
use crate::ui::{HostUi, StatusKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Continue,
    Suppress,
}

pub fn blocked_close_status(children: &[String]) -> String {
    format!("Close the dependent window(s) first: {}", children.join(", "))
}

impl<H: HostUi> ParameterMapper<H> {
    pub fn handle_event(&mut self, event: &HostEvent) -> EventOutcome {
        let Some((rule, route)) = self.router.classify_with_rule(&self.host, event) else {
            return EventOutcome::Continue;
        };
        let outcome = if route.suppresses_default() {
            EventOutcome::Suppress
        } else {
            EventOutcome::Continue
        };

        match route {
            Route::BlockClose { children } => {
                self.log.warn(
                    "routing.close.blocked",
                    &format!("{} still has open children via {rule}", event.form_id),
                );
                self.host
                    .set_status(&blocked_close_status(&children), StatusKind::Warning);
            }
            Route::LoadReportsGrid => {
                let department = self.selected_department();
                self.load_reports_grid(department.as_deref());
            }
            Route::ShowReportParameters { row } => self.show_from_selected_row(row),
            Route::OpenQuerySelector { lookup_item } => {
                self.open_query_selector(&event.form_id, &lookup_item)
            }
            Route::GenerateReport => self.generate_selected_report(),
            Route::DisposeEmbeddedHost => {
                self.dispose_embedded_host();
            }
            Route::MappingFormClosed => self.discard_session(&event.form_id),
            Route::SelectFilterColumn { column } => {
                self.update_selected_column(&event.form_id, &column)
            }
            Route::ApplySelection { row } => self.apply_selection(&event.form_id, row),
            Route::RefreshFilteredGrid => self.refresh_filtered_grid(&event.form_id),
            Route::PickerClosed => self.discard_picker(&event.form_id),
        }
        outcome
    }
}
