use r3bl_tui::{
    box_end, box_start, ch, col, new_style, render_component_in_current_box, req_size_pc, row,
    send_signal, surface, throws, throws_with_return, tui_color, tui_stylesheet, App,
    BoxedSafeApp, CommonResult, ComponentRegistry, ComponentRegistryMap, ContainsResult,
    EventPropagation, FlexBoxId, GlobalData, HasFocus, InputEvent, LayoutDirection,
    LayoutManagement, PerformPositioningAndSizing, RenderPipeline, Surface, SurfaceProps,
    SurfaceRender, TerminalWindowMainThreadSignal, TuiStylesheet,
};

use super::{
    add_form::{AddForm, OnAdd},
    AppSignal, Mode, State,
};

// Constants for the component IDs. AddButton and AddForm double as the
// style ids marking which render branch the root box is showing.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Id {
    AddButton = 1,
    AddForm = 2,
}

impl From<Id> for u8 {
    fn from(id: Id) -> u8 {
        id as u8
    }
}

impl From<Id> for FlexBoxId {
    fn from(id: Id) -> FlexBoxId {
        FlexBoxId::new(id)
    }
}

pub struct AppMain {
    /// Handed to the AddForm component on init.
    on_add: Option<OnAdd>,
    /// Exit after the first accepted entry.
    once: bool,
}

impl AppMain {
    pub fn new_boxed(on_add: Option<OnAdd>, once: bool) -> BoxedSafeApp<State, AppSignal> {
        Box::new(Self { on_add, once })
    }
}

impl App for AppMain {
    type S = State;
    type AS = AppSignal;

    fn app_init(
        &mut self,
        component_registry_map: &mut ComponentRegistryMap<Self::S, Self::AS>,
        has_focus: &mut HasFocus,
    ) {
        let form_id = FlexBoxId::from(Id::AddForm);
        if let ContainsResult::DoesNotContain =
            ComponentRegistry::contains(component_registry_map, form_id)
        {
            let component = AddForm::new_boxed(form_id, self.on_add.take());
            ComponentRegistry::put(component_registry_map, form_id, component);
        }

        if has_focus.get_id().is_none() {
            has_focus.set_id(form_id);
        }
    }

    fn app_handle_input_event(
        &mut self,
        input_event: InputEvent,
        global_data: &mut GlobalData<State, AppSignal>,
        component_registry_map: &mut ComponentRegistryMap<State, AppSignal>,
        has_focus: &mut HasFocus,
    ) -> CommonResult<EventPropagation> {
        // Ctrl+Q is handled by exit_keys in main_event_loop. Everything else
        // goes to the form, which owns both render branches.
        ComponentRegistry::route_event_to_focused_component(
            global_data,
            input_event,
            component_registry_map,
            has_focus,
        )
    }

    fn app_handle_signal(
        &mut self,
        signal: &AppSignal,
        global_data: &mut GlobalData<State, AppSignal>,
        _component_registry_map: &mut ComponentRegistryMap<State, AppSignal>,
        _has_focus: &mut HasFocus,
    ) -> CommonResult<EventPropagation> {
        throws_with_return!({
            match signal {
                AppSignal::CloseForm => {
                    global_data.state.set_editing(false);
                    EventPropagation::ConsumedRender
                }
                AppSignal::EntryAdded(value) => {
                    log::debug!("Captured entry: {value:?}");
                    global_data.state.add_entry(value.clone());

                    if self.once {
                        send_signal!(
                            global_data.main_thread_channel_sender,
                            TerminalWindowMainThreadSignal::Exit
                        );
                    } else {
                        // Evaluate before send_signal!; the macro moves its
                        // signal expression into a 'static tokio::spawn.
                        let show_message = TerminalWindowMainThreadSignal::ApplyAppSignal(
                            AppSignal::ShowMessage(format!("Captured '{value}'")),
                        );
                        send_signal!(global_data.main_thread_channel_sender, show_message);
                    }

                    EventPropagation::ConsumedRender
                }
                AppSignal::ShowMessage(msg) => {
                    if msg.is_empty() {
                        global_data.state.message = None;
                    } else {
                        global_data.state.message = Some(msg.clone());

                        // Auto-clear message after 3 seconds
                        let sender = global_data.main_thread_channel_sender.clone();
                        tokio::spawn(async move {
                            tokio::time::sleep(tokio::time::Duration::from_secs(3)).await;
                            let _ = sender
                                .send(TerminalWindowMainThreadSignal::ApplyAppSignal(
                                    AppSignal::ShowMessage("".to_string()),
                                ))
                                .await;
                        });
                    }

                    EventPropagation::ConsumedRender
                }
            }
        });
    }

    fn app_render(
        &mut self,
        global_data: &mut GlobalData<State, AppSignal>,
        component_registry_map: &mut ComponentRegistryMap<State, AppSignal>,
        has_focus: &mut HasFocus,
    ) -> CommonResult<RenderPipeline> {
        throws_with_return!({
            let window_size = global_data.window_size;

            let mut surface = {
                let mut it = surface!(stylesheet: create_stylesheet()?);

                it.surface_start(SurfaceProps {
                    pos: col(0) + row(0),
                    size: window_size,
                })?;

                ContainerSurfaceRender { _app: self }.render_in_surface(
                    &mut it,
                    global_data,
                    component_registry_map,
                    has_focus,
                )?;

                it.surface_end()?;
                it
            };

            surface.render_pipeline
        });
    }
}

struct ContainerSurfaceRender<'a> {
    _app: &'a mut AppMain,
}

impl SurfaceRender<State, AppSignal> for ContainerSurfaceRender<'_> {
    fn render_in_surface(
        &mut self,
        surface: &mut Surface,
        global_data: &mut GlobalData<State, AppSignal>,
        component_registry_map: &mut ComponentRegistryMap<State, AppSignal>,
        has_focus: &mut HasFocus,
    ) -> CommonResult<()> {
        throws!({
            let component_id = FlexBoxId::from(Id::AddForm);

            // The root box carries the style id of the active render branch.
            let style_id = match global_data.state.mode() {
                Mode::Button => FlexBoxId::from(Id::AddButton),
                Mode::Form => FlexBoxId::from(Id::AddForm),
            };

            box_start!(
                in: surface,
                id: component_id,
                dir: LayoutDirection::Vertical,
                requested_size_percent: req_size_pc!(width: 100, height: 100),
                styles: [style_id]
            );
            render_component_in_current_box!(
                in: surface,
                component_id: component_id,
                from: component_registry_map,
                global_data: global_data,
                has_focus: has_focus
            );
            box_end!(in: surface);
        })
    }
}

fn create_stylesheet() -> CommonResult<TuiStylesheet> {
    throws_with_return!({
        tui_stylesheet! {
            new_style!(id: {Id::AddButton} padding: {ch(1)} color_bg: {tui_color!(23, 23, 28)}),
            new_style!(id: {Id::AddForm} padding: {ch(1)} color_bg: {tui_color!(30, 30, 40)})
        }
    })
}
