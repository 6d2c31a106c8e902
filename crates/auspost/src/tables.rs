use tracking_core::Status;

/// Which part of the carrier payload a status token came from.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum PayloadShape {
    /// `tracking_results[0].status`
    FlatShipment,
    /// `tracking_results[0].consignment.status`
    Consignment,
    /// `tracking_results[0].trackable_items[0].items[0].status`
    NestedItem,
}

struct StatusEntry {
    token: &'static str,
    status: Status,
    summary: &'static str,
}

struct StatusGroup {
    shape: PayloadShape,
    entries: &'static [StatusEntry],
}

/// Shipment-level vocabulary from the flat `status` field.
const FLAT_SHIPMENT: &[StatusEntry] = &[
    StatusEntry {
        token: "created",
        status: Status::Pending,
        summary: "The item or items in the shipment have been created, but have not been finalised in an order.",
    },
    StatusEntry {
        token: "sealed",
        status: Status::Pending,
        summary: "The shipment has been added to an order.",
    },
    StatusEntry {
        token: "initiated",
        status: Status::PreTransit,
        summary: "The item or items in the shipment have been finalised in an order and will be delivered when the parcels are received by Australia Post.",
    },
    StatusEntry {
        token: "in transit",
        status: Status::InTransit,
        summary: "The item or items in the shipment are being delivered.",
    },
    StatusEntry {
        token: "delivered",
        status: Status::Delivered,
        summary: "The item or items in the shipment have been delivered.",
    },
    StatusEntry {
        token: "awaiting collection",
        status: Status::PreTransit,
        summary: "The item or items in the shipment are awaiting collection.",
    },
    StatusEntry {
        token: "possible delay",
        status: Status::InTransit,
        summary: "A delay to the delivery of item or items in the shipment is highly likely. Refer to the Australia Post website or call 13 76 78 (13 POST) for more information.",
    },
    StatusEntry {
        token: "unsuccessful pickup",
        status: Status::Failure,
        summary: "The item or items in the shipment could not be collected by Australia Post for delivery.",
    },
    StatusEntry {
        token: "article damaged",
        status: Status::InTransit,
        summary: "The item or items in the shipment were damaged during delivery.",
    },
    StatusEntry {
        token: "cancelled",
        status: Status::Cancelled,
        summary: "Delivery of item or items in the shipment was cancelled.",
    },
    StatusEntry {
        token: "held by courier",
        status: Status::InTransit,
        summary: "The item or items in the shipment have been held by the courier.",
    },
    StatusEntry {
        token: "cannot be delivered",
        status: Status::Failure,
        summary: "The item or items in the shipment cannot be delivered as addressed.",
    },
    StatusEntry {
        token: "track items for detailed delivery information",
        status: Status::Unknown,
        summary: "A shipment level delivery summary cannot be determined, as the items in the shipment are at differing delivery statuses. Track the individual items in the shipment for detailed delivery information.",
    },
];

/// Consignment-level vocabulary (StarTrack consignment responses).
const CONSIGNMENT: &[StatusEntry] = &[
    StatusEntry {
        token: "delivered in full",
        status: Status::Delivered,
        summary: "All freight items in the consignment have been delivered.",
    },
];

/// Per-item vocabulary from `trackable_items[].items[].status`.
const NESTED_ITEM: &[StatusEntry] = &[
    StatusEntry {
        token: "item delivered",
        status: Status::Delivered,
        summary: "The item or items in the shipment have been delivered.",
    },
    StatusEntry {
        token: "delivered",
        status: Status::Delivered,
        summary: "The item or items in the shipment have been delivered.",
    },
];

const GROUPS: &[StatusGroup] = &[
    StatusGroup {
        shape: PayloadShape::FlatShipment,
        entries: FLAT_SHIPMENT,
    },
    StatusGroup {
        shape: PayloadShape::Consignment,
        entries: CONSIGNMENT,
    },
    StatusGroup {
        shape: PayloadShape::NestedItem,
        entries: NESTED_ITEM,
    },
];

pub(crate) const UNKNOWN_STATUS_SUMMARY: &str = "An unknown Australia Post status";

/// Resolve a lower-cased status token.
///
/// Tokens are unique within each variant group; the group matching the
/// payload shape that produced the token is consulted first, then the
/// remaining groups in declaration order. First match wins.
pub(crate) fn map_status(token: &str, shape: Option<PayloadShape>) -> (Status, &'static str) {
    let matched = GROUPS.iter().filter(|group| Some(group.shape) == shape);
    let rest = GROUPS.iter().filter(|group| Some(group.shape) != shape);

    for group in matched.chain(rest) {
        if let Some(entry) = group.entries.iter().find(|entry| entry.token == token) {
            return (entry.status, entry.summary);
        }
    }
    (Status::Unknown, UNKNOWN_STATUS_SUMMARY)
}

struct ErrorEntry {
    token: &'static str,
    status: Status,
    summary: &'static str,
}

/// Consignment-level error vocabulary. An unrecognized error token must not
/// override a valid status mapping, hence the `Option` lookup.
const ERRORS: &[ErrorEntry] = &[
    ErrorEntry {
        token: "esb-10001",
        status: Status::NotFound,
        summary: "Invalid Tracking ID: The requested consignment could not be found.",
    },
    ErrorEntry {
        token: "esb-10002",
        status: Status::NotFound,
        summary: "Product Not Trackable: The query article or query consignment call identified that the article or consignment respectively is not trackable.",
    },
    ErrorEntry {
        token: "esb-20010",
        status: Status::Failure,
        summary: "System Error: An internal technical error occurred.",
    },
    ErrorEntry {
        token: "esb-20050",
        status: Status::Failure,
        summary: "System Error: An internal technical error occurred.",
    },
    ErrorEntry {
        token: "51100",
        status: Status::Failure,
        summary: "Tracking ID Missing: The request must contain at least one tracking id.",
    },
    ErrorEntry {
        token: "51101",
        status: Status::Unknown,
        summary: "Too many AP tracking IDs: The request must contain 10 or less AP article ids, consignment ids, or barcode ids.",
    },
    ErrorEntry {
        token: "51102",
        status: Status::Unknown,
        summary: "Too many SP tracking IDs: The request must contain 10 or less StarTrack consignment ids.",
    },
    ErrorEntry {
        token: "51103",
        status: Status::Unknown,
        summary: "Tracking IDs Mix of AP and ST: The request must only contain tracking ids for either StarTrack consignment ids or a mix of AP article ids, consignment ids, or barcode ids.",
    },
    ErrorEntry {
        token: "51104",
        status: Status::NotFound,
        summary: "Invalid Tracking ID: One or more submitted tracking ids could not be found.",
    },
];

/// Resolve a lower-cased error token, if it is in the known vocabulary.
pub(crate) fn map_error(token: &str) -> Option<(Status, &'static str)> {
    ERRORS
        .iter()
        .find(|entry| entry.token == token)
        .map(|entry| (entry.status, entry.summary))
}
