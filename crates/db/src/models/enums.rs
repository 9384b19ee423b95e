//! Rust mirrors of the Postgres enum types.
//!
//! Variant names are the enum labels verbatim, on the wire and in SQL.

use std::fmt;
use std::str::FromStr;

use rentwise_core::error::CoreError;

macro_rules! define_pg_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $pg_name:literal {
            $( $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize, sqlx::Type,
        )]
        #[sqlx(type_name = $pg_name)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Every label, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $( stringify!($variant) => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        concat!("Invalid ", $pg_name, " '{}'"),
                        other
                    ))),
                }
            }
        }
    };
}

define_pg_enum! {
    /// Kind of dwelling a property is.
    PropertyType as "property_type" {
        Rooms,
        Tinyhouse,
        Apartment,
        Villa,
        Townhouse,
        Cottage,
    }
}

define_pg_enum! {
    Amenity as "amenity" {
        WasherDryer,
        AirConditioning,
        Dishwasher,
        HighSpeedInternet,
        HardwoodFloors,
        WalkInClosets,
        Microwave,
        Refrigerator,
        Pool,
        Gym,
        Parking,
        PetsAllowed,
        WiFi,
    }
}

define_pg_enum! {
    Highlight as "highlight" {
        HighSpeedInternetAccess,
        WasherDryer,
        AirConditioning,
        Heating,
        SmokeFree,
        CableReady,
        SatelliteTV,
        DoubleVanities,
        TubShower,
        Intercom,
        SprinklerSystem,
        RecentlyRenovated,
        CloseToTransit,
        GreatView,
        QuietNeighborhood,
    }
}

define_pg_enum! {
    /// Review state of a rental application.
    ApplicationStatus as "application_status" {
        Pending,
        Denied,
        Approved,
    }
}

define_pg_enum! {
    PaymentStatus as "payment_status" {
        Pending,
        Paid,
        PartiallyPaid,
        Overdue,
    }
}

/// Parse every entry of a list, failing on the first unknown label.
pub fn parse_all<T: FromStr<Err = CoreError>>(values: &[String]) -> Result<Vec<T>, CoreError> {
    values.iter().map(|v| v.parse()).collect()
}
