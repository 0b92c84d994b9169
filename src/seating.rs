//! Seat-assignment checks for ticket requests.
//!
//! Geometry is validated against the flight's airplane before any write. The
//! duplicate check is repeated inside the order transaction, and the unique
//! index on (flight_id, row, seat) remains the final arbiter between
//! concurrent orders.

use serde::Serialize;
use thiserror::Error;

/// Why a ticket request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SeatRejection {
    #[error("row number must be between 1 and {max}")]
    RowOutOfRange { max: i32 },
    #[error("seat number must be between 1 and {max}")]
    SeatOutOfRange { max: i32 },
    #[error("this seat is already taken on the flight")]
    DuplicateSeat,
}

impl SeatRejection {
    /// The request field the rejection points at, where one applies.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SeatRejection::RowOutOfRange { .. } => Some("row"),
            SeatRejection::SeatOutOfRange { .. } => Some("seat"),
            SeatRejection::DuplicateSeat => None,
        }
    }

    pub fn max(&self) -> Option<i32> {
        match self {
            SeatRejection::RowOutOfRange { max } | SeatRejection::SeatOutOfRange { max } => {
                Some(*max)
            }
            SeatRejection::DuplicateSeat => None,
        }
    }
}

/// Validate a requested (row, seat) against the airplane's seat grid.
/// Row is checked before seat; the first failure wins.
pub fn check_seat(rows: i32, seats_in_row: i32, row: i32, seat: i32) -> Result<(), SeatRejection> {
    if row < 1 || row > rows {
        return Err(SeatRejection::RowOutOfRange { max: rows });
    }
    if seat < 1 || seat > seats_in_row {
        return Err(SeatRejection::SeatOutOfRange { max: seats_in_row });
    }
    Ok(())
}

/// Seats still sellable on a flight.
pub fn tickets_available(capacity: i32, tickets_sold: i32) -> i32 {
    capacity - tickets_sold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_any_seat_inside_the_grid() {
        assert_eq!(check_seat(20, 6, 1, 1), Ok(()));
        assert_eq!(check_seat(20, 6, 20, 6), Ok(()));
        assert_eq!(check_seat(20, 6, 5, 3), Ok(()));
    }

    #[test]
    fn rejects_row_past_the_last_row() {
        assert_eq!(
            check_seat(20, 6, 21, 1),
            Err(SeatRejection::RowOutOfRange { max: 20 })
        );
    }

    #[test]
    fn rejects_seat_past_the_row_width() {
        assert_eq!(
            check_seat(20, 6, 5, 7),
            Err(SeatRejection::SeatOutOfRange { max: 6 })
        );
    }

    #[test]
    fn rejects_zero_and_negative_positions() {
        assert_eq!(
            check_seat(20, 6, 0, 1),
            Err(SeatRejection::RowOutOfRange { max: 20 })
        );
        assert_eq!(
            check_seat(20, 6, 1, 0),
            Err(SeatRejection::SeatOutOfRange { max: 6 })
        );
        assert_eq!(
            check_seat(20, 6, -3, 2),
            Err(SeatRejection::RowOutOfRange { max: 20 })
        );
    }

    #[test]
    fn row_check_wins_when_both_are_out_of_range() {
        assert_eq!(
            check_seat(20, 6, 21, 7),
            Err(SeatRejection::RowOutOfRange { max: 20 })
        );
    }

    #[test]
    fn rejection_points_at_the_offending_field() {
        assert_eq!(
            SeatRejection::RowOutOfRange { max: 20 }.field(),
            Some("row")
        );
        assert_eq!(
            SeatRejection::SeatOutOfRange { max: 6 }.field(),
            Some("seat")
        );
        assert_eq!(SeatRejection::DuplicateSeat.field(), None);
        assert_eq!(SeatRejection::RowOutOfRange { max: 20 }.max(), Some(20));
        assert_eq!(SeatRejection::DuplicateSeat.max(), None);
    }

    #[test]
    fn availability_subtracts_sold_tickets() {
        // 30 rows x 6 seats with 45 sold
        assert_eq!(tickets_available(180, 45), 135);
        assert_eq!(tickets_available(180, 0), 180);
        assert_eq!(tickets_available(180, 180), 0);
    }

    #[test]
    fn rejection_messages_carry_the_bound() {
        assert_eq!(
            SeatRejection::RowOutOfRange { max: 20 }.to_string(),
            "row number must be between 1 and 20"
        );
        assert_eq!(
            SeatRejection::SeatOutOfRange { max: 6 }.to_string(),
            "seat number must be between 1 and 6"
        );
    }
}
