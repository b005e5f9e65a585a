/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Canned ADT^A01 message used as a self-test and demo payload.

use ironhl7_core::delimiters::ENCODING_CHARACTERS;
use ironhl7_core::message::Message;
use ironhl7_core::types::Timestamp;

/// Builds the sample message stamped with the current local time.
#[must_use]
pub fn sample_message() -> Message {
    sample_message_at(Timestamp::now())
}

/// Builds the sample message stamped with `timestamp` (MSH-7).
#[must_use]
pub fn sample_message_at(timestamp: Timestamp) -> Message {
    let mut message = Message::with_capacity(2);

    message.add_segment(
        "MSH",
        [
            ENCODING_CHARACTERS.to_string(),
            "SENDING_APP".to_string(),
            "SENDING_FACILITY".to_string(),
            "RECEIVING_APP".to_string(),
            "RECEIVING_FACILITY".to_string(),
            timestamp.to_hl7(),
            String::new(),
            "ADT^A01".to_string(),
            "MSG00001".to_string(),
            "P".to_string(),
            "2.5".to_string(),
        ],
    );

    message.add_segment(
        "PID",
        ["", "12345", "", "", "Doe^John", "", "19800101", "M"],
    );

    message
}
