// src/ui/widgets/mod.rs

pub mod alert_popup;
pub mod completion;
pub mod file_upload;
pub mod footer;
pub mod form_section;
pub mod header;
pub mod prediction_form;
pub mod results_page;
pub mod slider_input;
pub mod toggle_switch;

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

    /// Draws with `draw` into an in-memory terminal and returns the buffer.
    pub fn render_to_buffer(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(draw).unwrap();
        terminal.backend().buffer().clone()
    }

    /// The buffer's text, one `String` per row.
    pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    pub fn buffer_text(buffer: &Buffer) -> String {
        buffer_lines(buffer).join("\n")
    }
}
