// The scan loop's Link: embassy-sync mailboxes from kernel::link
//
// The tick logic itself lives in myriad::Scanner; this only moves values
// in and out of the statics without blocking.

use myriad::{Link, MatrixRow, MotionReport};

use super::link::{ENCODER_PADS, MATRIX_ROW, POINTER_REPORTS, REMOTE_REPORT, SCROLL_KEY};

pub struct Mailboxes;

impl Link for Mailboxes {
    fn scroll_key(&mut self) -> Option<bool> {
        SCROLL_KEY.try_take()
    }

    fn remote_report(&mut self) -> Option<MotionReport> {
        REMOTE_REPORT.try_take()
    }

    fn card_row(&mut self, row: MatrixRow) {
        MATRIX_ROW.signal(row);
    }

    fn encoder_pads(&mut self, levels: (bool, bool)) {
        ENCODER_PADS.signal(levels);
    }

    fn send_report(&mut self, report: MotionReport) -> bool {
        POINTER_REPORTS.try_send(report).is_ok()
    }
}
