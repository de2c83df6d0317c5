//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant fields
//! while using defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{Currency, Money, OfficeId, StayPeriod};
use domain_lodging::{Bed, BedStatus, Gender, Room};
use domain_reservation::{Guest, PaymentMethod, PaymentRequest, Reservation};
use fake::faker::name::en::Name;
use fake::Fake;

use crate::fixtures::{MoneyFixtures, StringFixtures, TemporalFixtures};

/// Builder for constructing test reservations
pub struct TestReservationBuilder {
    booked_by: String,
    hostel_office_id: OfficeId,
    guest_office_id: OfficeId,
    stay: StayPeriod,
    bed_prices: Vec<Money>,
}

impl Default for TestReservationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestReservationBuilder {
    /// Creates a new builder with the standard four-night, two-bed scenario
    pub fn new() -> Self {
        Self {
            booked_by: StringFixtures::booker_name().to_string(),
            hostel_office_id: OfficeId::new(),
            guest_office_id: OfficeId::new(),
            stay: TemporalFixtures::four_night_stay(),
            bed_prices: vec![MoneyFixtures::php_500(), MoneyFixtures::php_300()],
        }
    }

    /// Sets the booker name
    pub fn with_booked_by(mut self, name: impl Into<String>) -> Self {
        self.booked_by = name.into();
        self
    }

    /// Uses a generated booker name
    pub fn with_fake_booker(mut self) -> Self {
        self.booked_by = Name().fake();
        self
    }

    /// Sets the owning hostel office
    pub fn with_hostel_office(mut self, office_id: OfficeId) -> Self {
        self.hostel_office_id = office_id;
        self
    }

    /// Sets the stay range
    pub fn with_stay(mut self, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        self.stay = StayPeriod::new(check_in, check_out).expect("invalid builder stay");
        self
    }

    /// Sets the assigned bed prices
    pub fn with_bed_prices(mut self, prices: Vec<Money>) -> Self {
        self.bed_prices = prices;
        self
    }

    /// Leaves the reservation without bed assignments (empty ledger)
    pub fn without_beds(mut self) -> Self {
        self.bed_prices = Vec::new();
        self
    }

    /// Builds the reservation, applying bed assignment when prices are set
    pub fn build(self) -> Reservation {
        let mut reservation = Reservation::new(
            self.booked_by,
            self.hostel_office_id,
            self.guest_office_id,
            self.stay,
            Currency::PHP,
        );
        if !self.bed_prices.is_empty() {
            reservation
                .apply_bed_assignment(&self.bed_prices, Money::zero(Currency::PHP))
                .expect("builder bed assignment failed");
        }
        reservation
    }
}

/// Builder for constructing test guests
pub struct TestGuestBuilder {
    display_name: String,
    gender: Gender,
}

impl Default for TestGuestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestGuestBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            display_name: StringFixtures::guest_name().to_string(),
            gender: Gender::Female,
        }
    }

    /// Sets the guest name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Uses a generated guest name
    pub fn with_fake_name(mut self) -> Self {
        self.display_name = Name().fake();
        self
    }

    /// Sets the gender
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Builds a guest attached to the given reservation
    pub fn build_for(self, reservation: &Reservation) -> Guest {
        Guest::new(reservation.id, self.display_name, self.gender)
    }
}

/// Builder for constructing test rooms with beds
pub struct TestRoomBuilder {
    office_id: OfficeId,
    name: String,
    eligible_gender: Gender,
    bed_prices: Vec<Option<Money>>,
}

impl Default for TestRoomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRoomBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            office_id: OfficeId::new(),
            name: StringFixtures::room_name().to_string(),
            eligible_gender: Gender::Any,
            bed_prices: vec![Some(MoneyFixtures::php_500())],
        }
    }

    /// Sets the owning office
    pub fn with_office(mut self, office_id: OfficeId) -> Self {
        self.office_id = office_id;
        self
    }

    /// Restricts the room to a gender
    pub fn with_eligible_gender(mut self, gender: Gender) -> Self {
        self.eligible_gender = gender;
        self
    }

    /// Sets the beds by price; `None` creates an unpriced bed
    pub fn with_beds(mut self, prices: Vec<Option<Money>>) -> Self {
        self.bed_prices = prices;
        self
    }

    /// Builds the room and its beds
    pub fn build(self) -> (Room, Vec<Bed>) {
        let room = Room::new(self.office_id, self.name)
            .with_eligible_gender(self.eligible_gender);

        let beds = self
            .bed_prices
            .into_iter()
            .enumerate()
            .map(|(i, price)| {
                let bed = Bed::new(room.id, format!("A-{}", i + 1))
                    .with_status(BedStatus::Available);
                match price {
                    Some(p) => bed.with_price(p),
                    None => bed,
                }
            })
            .collect();

        (room, beds)
    }
}

/// Creates a valid payment request with unique receipt/transaction markers
pub fn payment_request(amount: Money, suffix: &str) -> PaymentRequest {
    PaymentRequest {
        amount,
        or_number: format!("OR-{suffix}"),
        or_date: TemporalFixtures::check_in(),
        transaction_id: format!("T-{suffix}"),
        method: PaymentMethod::Cash,
    }
}
