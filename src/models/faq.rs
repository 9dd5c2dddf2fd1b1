//! Static FAQ content

use serde::Serialize;

/// A question and its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
}

const FAQS: [FaqItem; 5] = [
    FaqItem {
        question: "How do I book a tour?",
        answer: "Choose a tour, hit Book Now, and fill out your details.",
    },
    FaqItem {
        question: "What payment methods are accepted?",
        answer: "We accept major cards and secure online transfers.",
    },
    FaqItem {
        question: "What is the cancellation policy?",
        answer: "Free cancellation up to 7 days before departure.",
    },
    FaqItem {
        question: "Is travel insurance included?",
        answer: "Insurance is optional and can be added at checkout.",
    },
    FaqItem {
        question: "How can I contact support?",
        answer: "Email support@weebtours.com or call +1 (555) 123-4567.",
    },
];

/// The fixed FAQ list, in display order
pub fn faqs() -> &'static [FaqItem] {
    &FAQS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_entries() {
        assert_eq!(faqs().len(), 5);
        assert_eq!(faqs()[0].question, "How do I book a tour?");
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(faqs()[2]).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "question": "What is the cancellation policy?",
                "answer": "Free cancellation up to 7 days before departure."
            })
        );
    }
}
