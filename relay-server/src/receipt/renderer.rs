//! Receipt rendering for guest-facing thermal receipts
//!
//! Turns a batch of pending job records into one Star Document Markup
//! string, one receipt per job, each ending in a partial cut. The layout
//! (directive order, indents, labels) is the fixed receipt format of the
//! upstream order system; changing it changes what prints in stores.

use super::order::{FulfillmentType, Order};
use crate::jobs::{JobRecord, JobStatus};
use star_markup::{Font, Indent, MarkupBuilder};

/// Renders job batches into printable markup
#[derive(Debug, Clone, Copy)]
pub struct ReceiptRenderer {
    width: usize,
}

impl ReceiptRenderer {
    /// `width` is the paper width in characters (48 for 80mm paper)
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Render every pending record in `records`, in order
    ///
    /// Non-pending records are skipped even though the caller normally
    /// pre-filters: the token round-trips through the printer, so a job
    /// may have changed state since it was offered. Records whose order
    /// payload fails to parse are skipped with a warning; one bad record
    /// never blocks the rest of the batch.
    pub fn render(&self, records: &[JobRecord]) -> String {
        let mut markup = MarkupBuilder::new(self.width);

        for record in records {
            if record.status != JobStatus::Pending {
                continue;
            }
            match record.parse_order() {
                Ok(order) => self.render_order(&mut markup, &order),
                Err(err) => {
                    tracing::warn!("Skipping job with unparsable order payload: {}", err);
                }
            }
        }

        markup.finalize()
    }

    fn render_order(&self, markup: &mut MarkupBuilder, order: &Order) {
        self.render_header(markup, order);
        self.render_order_type(markup, order);
        self.render_items(markup, order);
        self.render_totals(markup, order);
        self.render_footer(markup);
    }

    fn render_header(&self, markup: &mut MarkupBuilder, order: &Order) {
        let ready_preposition = if order.is_asap { "by" } else { "at" };

        markup
            .align_right()
            .line(&format!("Placed on {}", order.placement_time))
            .bold_on()
            .align_center()
            .magnify(3, 3)
            .line(&order.guest_display_name())
            .negative_on()
            .padded_line(&format!("#{}", order.padded_order_number()), 1)
            .plain()
            .line(&order.guest_phone)
            .underline_on()
            .line(&format!(
                "Should be ready {} {}",
                ready_preposition, order.estimated_completion_time
            ))
            .plain()
            .upperline_on()
            .space_line(self.width)
            .plain();
    }

    fn render_order_type(&self, markup: &mut MarkupBuilder, order: &Order) {
        markup
            .bold_on()
            .magnify(2, 2)
            .line(&order.order_type.to_string());

        if order.order_type == FulfillmentType::Delivery {
            markup.plain();
            if let Some(address) = &order.delivery_address {
                markup.line(address);
            }
            if let Some(suite) = &order.suite_apt_floor {
                markup.line(suite);
            }
            if let Some(details) = &order.delivery_details {
                markup.line(details);
            }
        }

        markup
            .plain()
            .underline_on()
            .space_line(self.width)
            .plain();
    }

    fn render_items(&self, markup: &mut MarkupBuilder, order: &Order) {
        markup.font(Font::A).magnify(1, 1).align_left();

        for item in &order.order_items {
            markup.magnified_column(
                &format!("{}X {}", item.quantity, item.food.name),
                &money(item.total),
            );

            if let Some(size) = &item.food_size {
                markup.bold_column("Size", Indent::Percent(10));
                markup.column_left(&format!("- {}", size.name), Indent::Percent(15));
            }

            for group in &item.options_grouped_by_add_on {
                markup.bold_column(&group.add_on_name, Indent::Percent(10));
                for sized in &group.options_grouped_by_option_size {
                    markup.bold_column(&sized.option_size_name, Indent::Percent(15));
                    for option in &sized.options {
                        markup.column_left(&format!("- {}", option.name), Indent::Percent(20));
                    }
                }
                for option in &group.options {
                    markup.column_left(&format!("- {}", option.name), Indent::Percent(15));
                }
            }

            markup.blank_line();
        }
    }

    fn render_totals(&self, markup: &mut MarkupBuilder, order: &Order) {
        markup.plain().dash_rule();
        markup.column("Subtotal:", &money(order.sub_total), Indent::Zero);
        markup.column("Tax:", &money(order.tax), Indent::Zero);
        // Zero means the upstream charged no fee; the line is suppressed,
        // not printed as $0.00
        if let Some(fee) = order.delivery_fee {
            if fee != 0.0 {
                markup.column("Delivery Fee:", &money(fee), Indent::Zero);
            }
        }
        markup.column("Tip:", &money(order.tip), Indent::Zero);
        markup.blank_line();
        markup.magnified_column("Total:", &money(order.total));
        markup.dash_rule();
    }

    fn render_footer(&self, markup: &mut MarkupBuilder) {
        markup
            .align_center()
            .line("Thank you! Have a great day!")
            .plain()
            .font(Font::B)
            .line("Powered by NexoServe.com")
            .plain()
            .cut();
    }
}

fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::order::{AddOnGroup, FoodRef, FoodSizeRef, OptionRef, OptionSizeGroup, OrderItem};

    fn pickup_order() -> Order {
        Order {
            placement_time: "01/15 10:58 AM".to_string(),
            guest_first_name: "Mo".to_string(),
            guest_last_name: Some("Khan".to_string()),
            guest_phone: "(555) 010-0000".to_string(),
            order_number: 214,
            is_asap: false,
            estimated_completion_time: "11:30 AM".to_string(),
            order_type: FulfillmentType::Pickup,
            delivery_address: None,
            suite_apt_floor: None,
            delivery_details: None,
            order_items: vec![OrderItem {
                quantity: 1,
                food: FoodRef {
                    name: "House Salad".to_string(),
                },
                food_size: None,
                options_grouped_by_add_on: vec![],
                total: 9.0,
            }],
            sub_total: 9.0,
            tax: 0.79,
            delivery_fee: None,
            tip: 1.5,
            total: 11.29,
        }
    }

    fn delivery_order() -> Order {
        Order {
            placement_time: "01/15 6:42 PM".to_string(),
            guest_first_name: "Dana".to_string(),
            guest_last_name: Some("Whitman".to_string()),
            guest_phone: "(555) 010-7733".to_string(),
            order_number: 7,
            is_asap: true,
            estimated_completion_time: "7:15 PM".to_string(),
            order_type: FulfillmentType::Delivery,
            delivery_address: Some("88 Harbor Way".to_string()),
            suite_apt_floor: Some("Apt 2B".to_string()),
            delivery_details: Some("Ring twice".to_string()),
            order_items: vec![OrderItem {
                quantity: 2,
                food: FoodRef {
                    name: "Margherita Pizza".to_string(),
                },
                food_size: Some(FoodSizeRef {
                    name: "Large".to_string(),
                }),
                options_grouped_by_add_on: vec![AddOnGroup {
                    add_on_name: "Toppings".to_string(),
                    options_grouped_by_option_size: vec![OptionSizeGroup {
                        option_size_name: "Left Half".to_string(),
                        options: vec![OptionRef {
                            name: "Mushrooms".to_string(),
                        }],
                    }],
                    options: vec![OptionRef {
                        name: "Olives".to_string(),
                    }],
                }],
                total: 25.98,
            }],
            sub_total: 25.98,
            tax: 2.27,
            delivery_fee: Some(4.99),
            tip: 5.0,
            total: 38.24,
        }
    }

    fn pending_record(order: &Order) -> JobRecord {
        JobRecord {
            status: JobStatus::Pending,
            order: serde_json::to_string(order).unwrap(),
        }
    }

    #[test]
    fn test_pickup_receipt_matches_expected_markup() {
        let renderer = ReceiptRenderer::new(48);
        let markup = renderer.render(&[pending_record(&pickup_order())]);

        let expected = r"[align: right]
Placed on 01/15 10:58 AM
[bold: on]
[align: center]
[magnify: width 3; height 3]
Mo K.
[negative: on]
[space: count 1]#0214[space: count 1]
[plain]
(555) 010-0000
[underline: on]
Should be ready at 11:30 AM
[plain]
[upperline: on]
[space: count 48]
[plain]
[bold: on]
[magnify: width 2; height 2]
PICKUP
[plain]
[underline: on]
[space: count 48]
[plain]
[font: a]
[magnify: width 1; height 1]
[align: left]
[font: b][magnify: width 2; height 2][column: left 1X House Salad; right $9.00; indent 0][plain]

[plain]
------------------------------------------------
[column: left Subtotal:; right $9.00; indent 0]
[column: left Tax:; right $0.79; indent 0]
[column: left Tip:; right $1.50; indent 0]

[font: b][magnify: width 2; height 2][column: left Total:; right $11.29; indent 0][plain]
------------------------------------------------
[align: center]
Thank you! Have a great day!
[plain]
[font: b]
Powered by NexoServe.com
[plain]
[cut: feed; partial]
";

        assert_eq!(markup, expected);
    }

    #[test]
    fn test_delivery_receipt_renders_address_fee_and_nested_options() {
        let renderer = ReceiptRenderer::new(48);
        let markup = renderer.render(&[pending_record(&delivery_order())]);

        assert!(markup.contains("Dana W.\n"));
        assert!(markup.contains("[space: count 1]#0007[space: count 1]\n"));
        assert!(markup.contains("Should be ready by 7:15 PM\n"));
        assert!(markup.contains("DELIVERY\n[plain]\n88 Harbor Way\nApt 2B\nRing twice\n[plain]\n"));
        assert!(markup.contains(
            "[font: b][magnify: width 2; height 2][column: left 2X Margherita Pizza; right $25.98; indent 0][plain]\n"
        ));
        assert!(markup.contains("[bold: on][column: left Size; indent 10%][bold: off]\n"));
        assert!(markup.contains("[column: left - Large; indent 15%]\n"));
        assert!(markup.contains("[bold: on][column: left Toppings; indent 10%][bold: off]\n"));
        assert!(markup.contains("[bold: on][column: left Left Half; indent 15%][bold: off]\n"));
        assert!(markup.contains("[column: left - Mushrooms; indent 20%]\n"));
        assert!(markup.contains("[column: left - Olives; indent 15%]\n"));
        assert!(markup.contains("[column: left Delivery Fee:; right $4.99; indent 0]\n"));
        assert!(markup.contains(
            "[font: b][magnify: width 2; height 2][column: left Total:; right $38.24; indent 0][plain]\n"
        ));
    }

    #[test]
    fn test_absent_delivery_fields_leave_no_trace() {
        let mut order = delivery_order();
        order.suite_apt_floor = None;
        order.delivery_details = None;

        let renderer = ReceiptRenderer::new(48);
        let markup = renderer.render(&[pending_record(&order)]);

        assert!(markup.contains("DELIVERY\n[plain]\n88 Harbor Way\n[plain]\n"));
        assert!(!markup.contains("undefined"));
        assert!(!markup.contains("null"));
    }

    #[test]
    fn test_zero_delivery_fee_suppresses_the_line() {
        let mut order = delivery_order();
        order.delivery_fee = Some(0.0);

        let renderer = ReceiptRenderer::new(48);
        let markup = renderer.render(&[pending_record(&order)]);

        assert!(!markup.contains("Delivery Fee"));
        assert!(markup.contains("[column: left Tax:; right $2.27; indent 0]\n"));
    }

    #[test]
    fn test_non_pending_and_malformed_records_are_skipped() {
        let records = vec![
            JobRecord {
                status: JobStatus::Done,
                order: serde_json::to_string(&pickup_order()).unwrap(),
            },
            JobRecord {
                status: JobStatus::Pending,
                order: "{not valid json".to_string(),
            },
            pending_record(&delivery_order()),
        ];

        let renderer = ReceiptRenderer::new(48);
        let markup = renderer.render(&records);

        assert_eq!(markup.matches("[cut: feed; partial]").count(), 1);
        assert!(markup.contains("Dana W."));
        assert!(!markup.contains("Mo K."));
    }

    #[test]
    fn test_batch_renders_receipts_in_record_order() {
        let records = vec![
            pending_record(&pickup_order()),
            pending_record(&delivery_order()),
        ];

        let renderer = ReceiptRenderer::new(48);
        let markup = renderer.render(&records);

        assert_eq!(markup.matches("[cut: feed; partial]").count(), 2);
        let first = markup.find("Mo K.").unwrap();
        let second = markup.find("Dana W.").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_empty_batch_renders_nothing() {
        let renderer = ReceiptRenderer::new(48);
        assert_eq!(renderer.render(&[]), "");
    }

    #[test]
    fn test_money_always_shows_two_fraction_digits() {
        assert_eq!(money(5.0), "$5.00");
        assert_eq!(money(5.1), "$5.10");
        assert_eq!(money(11.299), "$11.30");
    }
}
