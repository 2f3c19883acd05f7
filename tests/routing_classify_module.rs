use reportform::config::Settings;
use reportform::routing::{EventPhase, EventType, HostEvent, Route, RouteTargets, Router};
use reportform::ui::{Bounds, FormSpec, HostUi, MemoryHost};

fn router() -> Router {
    Router::new(RouteTargets::from_settings(&Settings::default()))
}

fn open(host: &mut MemoryHost, id: &str, parent: Option<&str>) {
    host.create_form(FormSpec {
        id: id.to_string(),
        title: id.to_string(),
        bounds: Bounds::default(),
        sizable: false,
        parent: parent.map(str::to_string),
    })
    .expect("create form");
}

fn after(form_id: &str, item_id: &str, event_type: EventType) -> HostEvent {
    HostEvent::new(form_id, item_id, event_type, EventPhase::After)
}

#[test]
fn rules_are_evaluated_in_a_fixed_order() {
    assert_eq!(
        Router::rule_names(),
        vec![
            "close_guard",
            "principal_reports_load",
            "principal_report_row",
            "mapping_lookup_button",
            "mapping_generate_button",
            "embedded_host_close",
            "mapping_form_closed",
            "picker_grid",
            "picker_search_key",
            "picker_search_validate",
            "picker_closed",
        ]
    );
}

#[test]
fn close_with_open_children_is_blocked_before_anything_else() {
    let mut host = MemoryHost::new();
    open(&mut host, "RPT_EMB_VIEWER", None);
    open(&mut host, "RPT_PRM_MAP1", Some("RPT_EMB_VIEWER"));

    let event = HostEvent::form_close("rpt_emb_viewer", EventPhase::Before);
    let (rule, route) = router()
        .classify_with_rule(&host, &event)
        .expect("route");
    assert_eq!(rule, "close_guard");
    assert_eq!(
        route,
        Route::BlockClose {
            children: vec!["RPT_PRM_MAP1".to_string()]
        }
    );
    assert!(route.suppresses_default());

    host.close_form("RPT_PRM_MAP1").expect("close child");
    assert_eq!(
        router().classify(&host, &event),
        Some(Route::DisposeEmbeddedHost)
    );
}

#[test]
fn principal_grid_row_clicks_open_parameters() {
    let host = MemoryHost::new();
    for event_type in [EventType::Click, EventType::DoubleClick] {
        let event = after("rpt_main", "GRD_RPTS", event_type).at_row(4);
        assert_eq!(
            router().classify(&host, &event),
            Some(Route::ShowReportParameters { row: 4 })
        );
    }

    let header = after("RPT_MAIN", "grd_rpts", EventType::Click).on_column("U_SS_IDRPT");
    assert_eq!(router().classify(&host, &header), None);
    let before =
        HostEvent::new("RPT_MAIN", "grd_rpts", EventType::Click, EventPhase::Before).at_row(0);
    assert_eq!(router().classify(&host, &before), None);
}

#[test]
fn principal_load_and_department_change_reload_reports() {
    let host = MemoryHost::new();
    assert_eq!(
        router().classify(&host, &after("rpt_main", "", EventType::FormVisible)),
        Some(Route::LoadReportsGrid)
    );
    let department = after("RPT_MAIN", "CMB_DPT", EventType::ComboSelect);
    assert_eq!(
        router().classify(&host, &department),
        Some(Route::LoadReportsGrid)
    );

    assert_eq!(router().classify(&host, &department.failed()), None);
    assert_eq!(
        router().classify(&host, &after("RPT_MAIN", "cmb_other", EventType::ComboSelect)),
        None
    );
    assert_eq!(
        router().classify(&host, &after("RPT_PRM_MAP1", "", EventType::FormVisible)),
        None
    );
    let before = HostEvent::new("RPT_MAIN", "", EventType::FormVisible, EventPhase::Before);
    assert_eq!(router().classify(&host, &before), None);
    assert_eq!(EventType::parse("combo_select"), EventType::ComboSelect);
    assert_eq!(EventType::parse("FORM-VISIBLE"), EventType::FormVisible);
}

#[test]
fn mapping_buttons_route_only_after_a_successful_press() {
    let host = MemoryHost::new();
    let lookup = after("RPT_PRM_MAP3", "prm_btn_02", EventType::ItemPressed);
    assert_eq!(
        router().classify(&host, &lookup),
        Some(Route::OpenQuerySelector {
            lookup_item: "prm_btn_02".to_string()
        })
    );
    assert_eq!(
        router().classify(&host, &after("RPT_PRM_MAP3", "btn_generate", EventType::ItemPressed)),
        Some(Route::GenerateReport)
    );
    assert_eq!(router().classify(&host, &lookup.clone().failed()), None);
    assert_eq!(
        router().classify(&host, &after("OTHER_FORM", "prm_btn_02", EventType::ItemPressed)),
        None
    );
}

#[test]
fn picker_grid_headers_and_rows_are_told_apart() {
    let host = MemoryHost::new();
    let header = after("RPT_QRY_PICK4", "grd_qry", EventType::Click).on_column("Name");
    assert_eq!(
        router().classify(&host, &header),
        Some(Route::SelectFilterColumn {
            column: "Name".to_string()
        })
    );
    let row = after("RPT_QRY_PICK4", "grd_qry", EventType::DoubleClick).at_row(2);
    assert_eq!(
        router().classify(&host, &row),
        Some(Route::ApplySelection { row: 2 })
    );
    let single_row_click = after("RPT_QRY_PICK4", "grd_qry", EventType::Click).at_row(2);
    assert_eq!(router().classify(&host, &single_row_click), None);
}

#[test]
fn search_box_refreshes_on_key_and_successful_validate() {
    let host = MemoryHost::new();
    assert_eq!(
        router().classify(&host, &after("RPT_QRY_PICK4", "edt_qsrch", EventType::KeyDown)),
        Some(Route::RefreshFilteredGrid)
    );
    let validate = after("RPT_QRY_PICK4", "edt_qsrch", EventType::Validate);
    assert_eq!(
        router().classify(&host, &validate),
        Some(Route::RefreshFilteredGrid)
    );
    assert_eq!(router().classify(&host, &validate.failed()), None);
}

#[test]
fn after_close_events_route_by_form_kind() {
    let host = MemoryHost::new();
    assert_eq!(
        router().classify(&host, &HostEvent::form_close("RPT_PRM_MAP9", EventPhase::After)),
        Some(Route::MappingFormClosed)
    );
    assert_eq!(
        router().classify(&host, &HostEvent::form_close("RPT_QRY_PICK10", EventPhase::After)),
        Some(Route::PickerClosed)
    );
    assert_eq!(
        router().classify(&host, &HostEvent::form_close("RPT_MAIN", EventPhase::After)),
        None
    );
}

#[test]
fn unrelated_events_are_ignored() {
    let host = MemoryHost::new();
    assert_eq!(
        router().classify(&host, &after("RPT_MAIN", "btn_x", EventType::Other)),
        None
    );
    assert_eq!(EventType::parse("Double_Click"), EventType::DoubleClick);
    assert_eq!(EventType::parse("resize"), EventType::Other);
}
