use crate::app::palette::debounce::DebounceTicket;
use crate::app::palette::fanout::FanoutRequest;

#[derive(Debug, Clone)]
pub enum Command {
    Debounce(DebounceTicket),
    SearchDirectory(FanoutRequest),
}
