use r3bl_tui::{
    col, new_style, render_ops, render_tui_styled_texts_into, row, send_signal,
    throws_with_return, tui_color, tui_styled_text, tui_styled_texts, BoxedSafeComponent,
    Component, EventPropagation, FlexBox, FlexBoxId, GlobalData, HasFocus, InputEvent, Key,
    KeyPress, RenderOp, RenderPipeline, SpecialKey, SurfaceBounds,
    TerminalWindowMainThreadSignal,
};

use super::{AppSignal, Mode, State};

/// Callback invoked with each accepted entry, exactly once per submission.
pub type OnAdd = Box<dyn FnMut(&str) + Send + Sync>;

/// A two-state entry widget: an add button that expands into a one-line
/// text form. Submitting a non-blank value fires `on_add`; submitting a
/// blank value does nothing.
pub struct AddForm {
    pub id: FlexBoxId,
    on_add: Option<OnAdd>,
}

impl AddForm {
    pub fn new(id: FlexBoxId) -> Self {
        Self { id, on_add: None }
    }

    pub fn with_on_add(id: FlexBoxId, on_add: OnAdd) -> Self {
        Self {
            id,
            on_add: Some(on_add),
        }
    }

    pub fn new_boxed(id: FlexBoxId, on_add: Option<OnAdd>) -> BoxedSafeComponent<State, AppSignal> {
        Box::new(Self { id, on_add })
    }

    /// Runs the submit flow against `state`: reads the input, ignores blank
    /// values, otherwise fires `on_add` with the literal text. A missing
    /// callback skips only the invocation; the state transition still
    /// happens. Returns the accepted value, if any.
    pub fn submit(&mut self, state: &mut State) -> Option<String> {
        let value = state.submit()?;
        if let Some(on_add) = self.on_add.as_mut() {
            on_add(&value);
        }
        Some(value)
    }

    /// Decodes one input event against the current mode and applies it to
    /// `state`. Signal-free; `handle_event` turns the returned action into
    /// signals for the main thread.
    pub(crate) fn apply_event(
        &mut self,
        state: &mut State,
        input_event: &InputEvent,
    ) -> FormAction {
        let InputEvent::Keyboard(KeyPress::Plain { key }) = input_event else {
            return FormAction::Unhandled;
        };

        match state.mode() {
            Mode::Button => match key {
                Key::SpecialKey(SpecialKey::Enter) => {
                    state.set_editing(true);
                    FormAction::Activated
                }
                Key::SpecialKey(SpecialKey::Esc) => FormAction::QuitRequested,
                _ => FormAction::Unhandled,
            },
            Mode::Form => match key {
                Key::SpecialKey(SpecialKey::Enter) => match self.submit(state) {
                    Some(value) => FormAction::Submitted(value),
                    None => FormAction::SubmitRejected,
                },
                Key::SpecialKey(SpecialKey::Esc) => FormAction::Cancelled,
                Key::SpecialKey(SpecialKey::Backspace) => {
                    state.draft.handle_backspace();
                    FormAction::Edited
                }
                Key::Character(ch) => {
                    state.draft.handle_char(*ch);
                    FormAction::Edited
                }
                _ => FormAction::Unhandled,
            },
        }
    }

    /// Every key event stops at the form; actions that changed anything
    /// also trigger a re-render.
    pub(crate) fn propagation_for(action: &FormAction) -> EventPropagation {
        match action {
            FormAction::Unhandled => EventPropagation::Consumed,
            _ => EventPropagation::ConsumedRender,
        }
    }
}

/// What applying one input event to the form did, before any signals are
/// sent.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FormAction {
    /// Key not bound in the current mode.
    Unhandled,
    /// Button-mode activation: the form is now open.
    Activated,
    /// Draft text changed.
    Edited,
    /// A non-blank draft was accepted and `on_add` has fired.
    Submitted(String),
    /// Submit on a blank draft: swallowed, nothing changes.
    SubmitRejected,
    /// Esc while the form is open.
    Cancelled,
    /// Esc on the button.
    QuitRequested,
}

impl Component<State, AppSignal> for AddForm {
    fn reset(&mut self) {
        // Draft reset happens in AppState::set_editing
    }

    fn get_id(&self) -> FlexBoxId {
        self.id
    }

    fn handle_event(
        &mut self,
        global_data: &mut GlobalData<State, AppSignal>,
        input_event: InputEvent,
        _has_focus: &mut HasFocus,
    ) -> CommonResult<EventPropagation> {
        throws_with_return!({
            let action = self.apply_event(&mut global_data.state, &input_event);

            match &action {
                FormAction::Submitted(value) => {
                    // Evaluate before send_signal!; the macro moves its signal
                    // expression into a 'static tokio::spawn.
                    let signal = TerminalWindowMainThreadSignal::ApplyAppSignal(
                        AppSignal::EntryAdded(value.clone()),
                    );
                    send_signal!(global_data.main_thread_channel_sender, signal);
                }
                FormAction::Cancelled => {
                    send_signal!(
                        global_data.main_thread_channel_sender,
                        TerminalWindowMainThreadSignal::ApplyAppSignal(AppSignal::CloseForm)
                    );
                }
                FormAction::QuitRequested => {
                    send_signal!(
                        global_data.main_thread_channel_sender,
                        TerminalWindowMainThreadSignal::Exit
                    );
                }
                _ => {}
            }

            Self::propagation_for(&action)
        })
    }

    fn render(
        &mut self,
        global_data: &mut GlobalData<State, AppSignal>,
        current_box: FlexBox,
        _surface_bounds: SurfaceBounds,
        _has_focus: &mut HasFocus,
    ) -> CommonResult<RenderPipeline> {
        throws_with_return!({
            let mut render_ops = render_ops!();
            let state = &global_data.state;

            let box_origin_pos = current_box.style_adjusted_origin_pos;
            let box_bounds_size = current_box.style_adjusted_bounds_size;

            let mut row_index = row(0);

            match state.mode() {
                Mode::Button => {
                    // The add button
                    let button_text = tui_styled_texts! {
                        tui_styled_text!{
                            @style: new_style!(bold color_fg: {tui_color!(hex "#1E1E2E")} color_bg: {tui_color!(hex "#00BFFF")}),
                            @text: format!("[ {} ]", state.button_label)
                        },
                    };
                    render_ops.push(RenderOp::MoveCursorPositionRelTo(
                        box_origin_pos,
                        col(0) + row_index,
                    ));
                    render_tui_styled_texts_into(&button_text, &mut render_ops);
                    render_ops.push(RenderOp::ResetColor);
                    row_index += row(2);

                    // Captured count
                    let count_line = match state.entries.len() {
                        0 => "No entries captured yet.".to_string(),
                        1 => "1 entry captured.".to_string(),
                        n => format!("{n} entries captured."),
                    };
                    let count_text = tui_styled_texts! {
                        tui_styled_text!{
                            @style: new_style!(dim color_fg: {tui_color!(hex "#888888")}),
                            @text: count_line
                        },
                    };
                    render_ops.push(RenderOp::MoveCursorPositionRelTo(
                        box_origin_pos,
                        col(0) + row_index,
                    ));
                    render_tui_styled_texts_into(&count_text, &mut render_ops);
                }
                Mode::Form => {
                    // Form title
                    let title_text = tui_styled_texts! {
                        tui_styled_text!{
                            @style: new_style!(bold color_fg: {tui_color!(hex "#00FFFF")}),
                            @text: "Add entry"
                        },
                    };
                    render_ops.push(RenderOp::MoveCursorPositionRelTo(
                        box_origin_pos,
                        col(0) + row_index,
                    ));
                    render_tui_styled_texts_into(&title_text, &mut render_ops);
                    row_index += row(2);

                    // The text input, scrolled so the tail stays visible
                    let input_width = box_bounds_size.col_width.as_usize().saturating_sub(4);
                    let value = &state.draft.text;
                    let char_count = value.chars().count();
                    let display_value: String = if char_count > input_width {
                        value.chars().skip(char_count - input_width).collect()
                    } else {
                        value.clone()
                    };

                    let input_text = tui_styled_texts! {
                        tui_styled_text!{
                            @style: new_style!(color_fg: {tui_color!(hex "#AAAAAA")}),
                            @text: "> "
                        },
                        tui_styled_text!{
                            @style: new_style!(color_fg: {tui_color!(hex "#FFFFFF")} color_bg: {tui_color!(hex "#333366")}),
                            @text: format!("{:<width$}", display_value, width = input_width)
                        },
                    };
                    render_ops.push(RenderOp::MoveCursorPositionRelTo(
                        box_origin_pos,
                        col(0) + row_index,
                    ));
                    render_tui_styled_texts_into(&input_text, &mut render_ops);

                    // Block cursor after the text
                    let cursor_offset = display_value.chars().count().min(input_width);
                    render_ops.push(RenderOp::MoveCursorPositionRelTo(
                        box_origin_pos,
                        col(2 + cursor_offset) + row_index,
                    ));
                    render_ops.push(RenderOp::SetFgColor(tui_color!(hex "#FFFFFF")));
                    render_ops.push(RenderOp::SetBgColor(tui_color!(hex "#FFFFFF")));
                    render_ops.push(RenderOp::PaintTextWithAttributes(" ".into(), None));
                    render_ops.push(RenderOp::ResetColor);
                }
            }

            // Show message if any (above hints)
            if let Some(message) = &state.message {
                if !message.is_empty() {
                    row_index += row(2);
                    if row_index.as_usize() < box_bounds_size.row_height.as_usize() {
                        let message_text = tui_styled_texts! {
                            tui_styled_text!{
                                @style: new_style!(bold color_fg: {tui_color!(hex "#00FF00")}),
                                @text: format!(" {} ", message)
                            },
                        };
                        render_ops.push(RenderOp::MoveCursorPositionRelTo(
                            box_origin_pos,
                            col(0) + row_index,
                        ));
                        render_tui_styled_texts_into(&message_text, &mut render_ops);
                    }
                }
            }

            // Key hints at the bottom of the box
            {
                let hints = match state.mode() {
                    Mode::Button => "Enter: Add | Esc/Ctrl+Q: Quit",
                    Mode::Form => "Enter: Submit | Esc: Cancel",
                };
                let hints_text = tui_styled_texts! {
                    tui_styled_text!{
                        @style: new_style!(dim color_fg: {tui_color!(hex "#888888")}),
                        @text: "Hints: "
                    },
                    tui_styled_text!{
                        @style: new_style!(bold color_fg: {tui_color!(hex "#AAAAAA")}),
                        @text: hints
                    },
                };
                let bottom_row = box_bounds_size.row_height.convert_to_row_index();
                render_ops.push(RenderOp::MoveCursorPositionRelTo(
                    box_origin_pos,
                    col(0) + bottom_row,
                ));
                render_tui_styled_texts_into(&hints_text, &mut render_ops);
            }

            let mut render_pipeline = RenderPipeline::default();
            render_pipeline.push(ZOrder::Normal, render_ops);
            render_pipeline
        })
    }
}

use r3bl_tui::{CommonResult, ZOrder};
