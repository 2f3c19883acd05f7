use crate::config::{LaunchMode, Settings};
use crate::embedding::{DisposeOutcome, EmbeddedHostRegistry, HostLayout, WindowingBackend};
use crate::forms::layout::MAPPING_FORM_PREFIX;
use crate::forms::{capture, extract, render, validate, MappingFormSession, RenderRequest};
use crate::metadata::{self, REPORT_CODE_COLUMN, REPORT_NAME_COLUMN};
use crate::picker::{self, QueryPickerContext, PICKER_FORM_PREFIX};
use crate::report::{
    embedded_factory, launch_standalone, resolve_report_file, DatabaseLogon, ReportEngine,
    ReportError, ReportRequest,
};
use crate::routing::{RouteTargets, Router};
use crate::shared::errors::{error_chain, ErrorKind, MapperError};
use crate::shared::logging::LogSink;
use crate::store::{DataStore, QueryResult};
use crate::ui::{HostUi, StatusKind};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::thread::JoinHandle;

pub const REPORT_OPENED_STATUS: &str = "Report opened";
pub const NO_SESSION_STATUS: &str = "Select a report first";

pub struct MapperServices {
    pub store: Box<dyn DataStore>,
    pub engine: Arc<dyn ReportEngine>,
    pub windowing: Arc<dyn WindowingBackend>,
    pub log: Arc<dyn LogSink>,
}

pub struct ParameterMapper<H: HostUi> {
    pub(crate) host: H,
    store: Box<dyn DataStore>,
    engine: Arc<dyn ReportEngine>,
    pub(crate) log: Arc<dyn LogSink>,
    settings: Settings,
    pub(crate) router: Router,
    session: Option<MappingFormSession>,
    pickers: Vec<QueryPickerContext>,
    registry: EmbeddedHostRegistry,
    viewers: Vec<JoinHandle<()>>,
    sequence: u32,
    today: Option<NaiveDate>,
}

impl<H: HostUi> ParameterMapper<H> {
    pub fn new(host: H, settings: Settings, services: MapperServices) -> Self {
        let router = Router::new(RouteTargets::from_settings(&settings));
        let registry = EmbeddedHostRegistry::new(
            services.windowing,
            Arc::clone(&services.log),
            HostLayout::from(&settings.embedded_host),
        );
        Self {
            host,
            store: services.store,
            engine: services.engine,
            log: services.log,
            settings,
            router,
            session: None,
            pickers: Vec::new(),
            registry,
            viewers: Vec::new(),
            sequence: 0,
            today: None,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> Option<&MappingFormSession> {
        self.session.as_ref()
    }

    pub fn pickers(&self) -> &[QueryPickerContext] {
        &self.pickers
    }

    pub fn registry(&self) -> &EmbeddedHostRegistry {
        &self.registry
    }

    pub fn take_viewer_threads(&mut self) -> Vec<JoinHandle<()>> {
        std::mem::take(&mut self.viewers)
    }

    fn next_form_id(&mut self, prefix: &str) -> String {
        self.sequence += 1;
        format!("{prefix}{}", self.sequence)
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Department chosen in the principal combo, else the configured one.
    pub fn selected_department(&self) -> Option<String> {
        let principal = &self.settings.principal;
        self.host
            .text(&principal.form_id, &principal.department_combo)
            .ok()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .or_else(|| principal.department.clone())
    }

    pub fn load_reports_grid(&mut self, department: Option<&str>) {
        match self.try_load_reports_grid(department) {
            Ok(count) => self.log.info(
                "reports.grid.loaded",
                &format!(
                    "bound {count} report(s) for department `{}`",
                    department.unwrap_or("*")
                ),
            ),
            Err(err) => {
                self.report_failure("reports.grid.failed", "Could not load the reports grid", err)
            }
        }
    }

    fn try_load_reports_grid(&mut self, department: Option<&str>) -> Result<usize, MapperError> {
        let reports = metadata::list_reports(self.store.as_ref(), department)?;
        let count = reports.len();
        let grid = QueryResult {
            columns: vec![REPORT_CODE_COLUMN.to_string(), REPORT_NAME_COLUMN.to_string()],
            rows: reports
                .into_iter()
                .map(|entry| vec![entry.code, entry.name])
                .collect(),
        };
        let principal = &self.settings.principal;
        self.host
            .bind_grid(&principal.form_id, &principal.reports_grid, grid)?;
        Ok(count)
    }

    pub fn show_from_selected_row(&mut self, row: usize) {
        if let Err(err) = self.try_show_from_selected_row(row) {
            self.report_failure(
                "mapping.render.failed",
                "Could not open report parameters",
                err,
            );
        }
    }

    fn try_show_from_selected_row(&mut self, row: usize) -> Result<(), MapperError> {
        let principal = self.settings.principal.form_id.clone();
        let grid = self
            .host
            .grid(&principal, &self.settings.principal.reports_grid)?;
        let Some((code, name)) = selected_report(&grid, row) else {
            return Ok(());
        };

        self.close_mapping_form_if_open();
        let definitions = metadata::load(self.store.as_ref(), self.log.as_ref(), &code);
        let form_id = self.next_form_id(MAPPING_FORM_PREFIX);
        let today = self.today();
        let session = render(
            &mut self.host,
            RenderRequest {
                form_id: &form_id,
                parent_form: Some(&principal),
                report_code: &code,
                report_name: &name,
                definitions,
                today,
            },
        )?;
        self.log.info(
            "mapping.render",
            &format!(
                "rendered {} parameter(s) for report `{code}` on {form_id}",
                session.fields.len()
            ),
        );
        self.session = Some(session);
        Ok(())
    }

    pub fn open_query_selector(&mut self, form_id: &str, lookup_item: &str) {
        if let Err(err) = self.try_open_query_selector(form_id, lookup_item) {
            self.report_failure("picker.open.failed", "Could not open the value list", err);
        }
    }

    fn try_open_query_selector(
        &mut self,
        form_id: &str,
        lookup_item: &str,
    ) -> Result<(), MapperError> {
        let Some(session) = self.session.as_ref().filter(|session| session.is_form(form_id)) else {
            return Ok(());
        };
        let Some(field) = session.field(lookup_item).cloned() else {
            return Ok(());
        };
        let origin_form = session.form_id.clone();
        let picker_id = self.next_form_id(PICKER_FORM_PREFIX);
        let opened = picker::open(
            &mut self.host,
            self.store.as_ref(),
            &picker_id,
            &origin_form,
            &field,
        )?;
        if let Some(context) = opened {
            self.log.info(
                "picker.open",
                &format!("opened {picker_id} for parameter `{}`", field.param_id),
            );
            self.pickers.push(context);
        }
        Ok(())
    }

    pub fn update_selected_column(&mut self, form_id: &str, column: &str) {
        let Some(context) = self.pickers.iter_mut().find(|ctx| ctx.is_form(form_id)) else {
            return;
        };
        let result = picker::select_column(&mut self.host, self.store.as_ref(), context, column);
        if let Err(err) = result {
            self.report_failure("picker.column.failed", "Could not filter the value list", err);
        }
    }

    pub fn refresh_filtered_grid(&mut self, form_id: &str) {
        let Some(context) = self.pickers.iter_mut().find(|ctx| ctx.is_form(form_id)) else {
            return;
        };
        let result = picker::refresh(&mut self.host, self.store.as_ref(), context);
        if let Err(err) = result {
            self.report_failure("picker.refresh.failed", "Could not filter the value list", err);
        }
    }

    pub fn apply_selection(&mut self, form_id: &str, row: usize) {
        let Some(index) = self.pickers.iter().position(|ctx| ctx.is_form(form_id)) else {
            return;
        };
        let context = &mut self.pickers[index];
        let field = self
            .session
            .as_ref()
            .filter(|session| session.is_form(&context.origin.form_id))
            .and_then(|session| session.field(&context.origin.value_item));
        match picker::apply_selection(&mut self.host, self.store.as_ref(), context, field, row) {
            Ok(true) => {
                self.pickers.remove(index);
            }
            Ok(false) => {}
            Err(err) => {
                self.report_failure("picker.select.failed", "Could not apply the selection", err)
            }
        }
    }

    pub fn discard_picker(&mut self, form_id: &str) {
        self.pickers.retain(|ctx| !ctx.is_form(form_id));
    }

    pub fn discard_session(&mut self, form_id: &str) {
        if !self
            .session
            .as_ref()
            .is_some_and(|session| session.is_form(form_id))
        {
            return;
        }
        self.session = None;
        self.pickers
            .retain(|ctx| !ctx.origin.form_id.eq_ignore_ascii_case(form_id));
    }

    pub fn generate_selected_report(&mut self) {
        if let Err(err) = self.try_generate_selected_report() {
            self.report_failure("report.generate.failed", "Could not open the report", err);
        }
    }

    fn try_generate_selected_report(&mut self) -> Result<(), MapperError> {
        let Some(session) = self.session.clone() else {
            self.host.set_status(NO_SESSION_STATUS, StatusKind::Warning);
            return Ok(());
        };

        let file_path = resolve_report_file(
            &self.settings.reports_base_path,
            &session.report_code,
            &session.report_name,
        )?
        .ok_or_else(|| ReportError::FileNotFound {
            code: session.report_code.clone(),
            base: self.settings.reports_base_path.display().to_string(),
        })?;

        let fields = capture(&session, &self.host);
        validate(&fields)?;
        let request = ReportRequest {
            report_code: session.report_code.clone(),
            file_path,
            parameters: extract(&fields),
            logon: DatabaseLogon::from_config(&self.settings.database),
        };

        match self.settings.launch_mode {
            LaunchMode::Embedded => {
                let host_id = self.settings.embedded_host.host_id.clone();
                let title = self.settings.embedded_host.title.clone();
                self.registry.dispose(&host_id);
                let factory = embedded_factory(Arc::clone(&self.engine), request);
                self.registry
                    .get_or_create(&mut self.host, &host_id, &title, factory)?;
            }
            LaunchMode::Standalone => {
                let handle =
                    launch_standalone(Arc::clone(&self.engine), Arc::clone(&self.log), request)?;
                self.viewers.push(handle);
            }
        }

        self.log.info(
            "report.generate",
            &format!(
                "report `{}` launched ({})",
                session.report_code,
                self.settings.launch_mode.as_str()
            ),
        );
        self.host.set_status(REPORT_OPENED_STATUS, StatusKind::Success);
        Ok(())
    }

    pub fn dispose_embedded_host(&mut self) -> DisposeOutcome {
        let host_id = self.settings.embedded_host.host_id.clone();
        let outcome = self.registry.dispose(&host_id);
        self.log.info(
            "embedding.host.disposed",
            &format!("embedded host `{host_id}` disposed: {outcome:?}"),
        );
        outcome
    }

    pub fn close_mapping_form_if_open(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let (children, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pickers)
            .into_iter()
            .partition(|ctx| session.is_form(&ctx.origin.form_id));
        self.pickers = remaining;
        for picker in children {
            if self.host.form_exists(&picker.form_id) {
                let _ = self.host.close_form(&picker.form_id);
            }
        }
        if self.host.form_exists(&session.form_id) {
            let _ = self.host.close_form(&session.form_id);
        }
        self.log.info(
            "mapping.closed",
            &format!("discarded session {}", session.form_id),
        );
    }

    fn report_failure(&mut self, event: &str, status: &str, err: MapperError) {
        match err.kind() {
            ErrorKind::UiBinding => {
                self.log
                    .warn(event, &format!("{status}: {}", error_chain(&err)));
            }
            ErrorKind::Configuration => {
                self.log.warn(event, &error_chain(&err));
                self.host.set_status(&err.to_string(), StatusKind::Error);
            }
            ErrorKind::Embedding => {
                self.log.error(event, status, &err);
                self.host.set_status(status, StatusKind::Warning);
            }
            ErrorKind::DataAccess | ErrorKind::Report => {
                self.log.error(event, status, &err);
                self.host.set_status(status, StatusKind::Error);
            }
        }
    }
}

fn selected_report(grid: &QueryResult, row: usize) -> Option<(String, String)> {
    let cells = grid.rows.get(row)?;
    let code = grid
        .value(row, REPORT_CODE_COLUMN)
        .or_else(|| cells.first().map(String::as_str))
        .map(str::trim)
        .filter(|code| !code.is_empty())?;
    let name = grid
        .value(row, REPORT_NAME_COLUMN)
        .or_else(|| cells.get(1).map(String::as_str))
        .unwrap_or_default()
        .trim();
    Some((code.to_string(), name.to_string()))
}
