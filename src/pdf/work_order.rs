//! Sample work order sheet
//!
//! Fixed template: every field lands at a fixed coordinate. Only the
//! specification values and the delivery address wrap, and only onto a
//! second line.

use super::{ContentStream, Font, PAGE_WIDTH, assemble, wrap};
use crate::domain::WorkOrder;

const LEFT: f64 = 34.0;
const WIDTH: f64 = PAGE_WIDTH - LEFT * 2.0;
const TOP: f64 = 806.0;

const SPEC_WRAP: usize = 56;
const DELIVERY_WRAP: usize = 35;

pub fn render(wo: &WorkOrder) -> Vec<u8> {
    let mut c = ContentStream::new();
    let mut y = TOP;

    title_band(&mut c, wo, &mut y);
    primary_information(&mut c, wo, &mut y);
    product_details(&mut c, wo, &mut y);
    specification_details(&mut c, wo, &mut y);
    dispatch_details(&mut c, wo, &mut y);
    signatures(&mut c, y);

    assemble(&c.finish())
}

fn title_band(c: &mut ContentStream, wo: &WorkOrder, y: &mut f64) {
    c.rect(LEFT, 34.0, WIDTH, 774.0, 1.1);
    c.rect(LEFT, *y - 40.0, WIDTH, 40.0, 1.1);
    c.text(
        "SAMPLE WORK ORDER STANDARD TEMPLATE / V1",
        LEFT + 10.0,
        *y - 24.0,
        13.0,
        Font::Bold,
    );
    c.text("WORK ORDER", LEFT + WIDTH - 110.0, *y - 24.0, 12.0, Font::Bold);
    *y -= 58.0;

    c.text(&format!("Date: {}", wo.date), LEFT + 10.0, *y, 10.0, Font::Regular);
    c.text(
        &format!("Document No: {}", wo.document_no),
        LEFT + 165.0,
        *y,
        10.0,
        Font::Regular,
    );
    c.text("Team: CEO + PPC", LEFT + WIDTH - 110.0, *y, 10.0, Font::Regular);
    *y -= 15.0;
    c.line(LEFT, *y, LEFT + WIDTH, *y, 1.0);
    *y -= 16.0;
}

fn primary_information(c: &mut ContentStream, wo: &WorkOrder, y: &mut f64) {
    c.text("Primary Information", LEFT + 10.0, *y, 11.0, Font::Bold);
    *y -= 10.0;

    let top = *y;
    c.rect(LEFT + 8.0, top - 126.0, WIDTH - 16.0, 126.0, 0.8);
    for x in [LEFT + 45.0, LEFT + 250.0, LEFT + WIDTH - 76.0] {
        c.line(x, top, x, top - 126.0, 0.7);
    }

    let number_and_date = format!("{} / {}", wo.work_order_no, wo.date);
    let rows: [(&str, &str, &str, &str); 6] = [
        ("1", "Sample Work Order No. & Date", number_and_date.as_str(), "PPC F1"),
        ("2", "Client Name", wo.client_name.as_str(), ""),
        ("3", "Enquiry Promoter", wo.enquiry_promoter.as_str(), ""),
        ("4", "Dispatch Due Date", wo.dispatch_due_date.as_str(), ""),
        ("5", "Enquiry Type", wo.enquiry_type.as_str(), ""),
        ("6", "Courier Name", wo.courier_name.as_str(), ""),
    ];

    c.text("No", LEFT + 14.0, top - 11.0, 9.0, Font::Bold);
    c.text("Particular", LEFT + 54.0, top - 11.0, 9.0, Font::Bold);
    c.text("Details", LEFT + 258.0, top - 11.0, 9.0, Font::Bold);
    c.text("Remark", LEFT + WIDTH - 68.0, top - 11.0, 9.0, Font::Bold);

    let row_top = top - 16.0;
    let row_height = 18.0;
    for i in 0..=rows.len() {
        let ry = row_top - i as f64 * row_height;
        c.line(LEFT + 8.0, ry, LEFT + WIDTH - 8.0, ry, 0.6);
    }
    for (i, (no, particular, details, remark)) in rows.iter().enumerate() {
        let ry = row_top - i as f64 * row_height - 13.0;
        c.text(no, LEFT + 14.0, ry, 9.0, Font::Regular);
        c.text(particular, LEFT + 54.0, ry, 9.0, Font::Regular);
        c.text(details, LEFT + 258.0, ry, 9.0, Font::Regular);
        c.text(remark, LEFT + WIDTH - 68.0, ry, 9.0, Font::Regular);
    }

    *y -= 142.0;
}

fn product_details(c: &mut ContentStream, wo: &WorkOrder, y: &mut f64) {
    c.text("Product Details", LEFT + 10.0, *y, 11.0, Font::Bold);
    *y -= 10.0;

    let top = *y;
    c.rect(LEFT + 8.0, top - 56.0, WIDTH - 16.0, 56.0, 0.8);
    for x in [LEFT + 40.0, LEFT + 290.0, LEFT + 405.0] {
        c.line(x, top, x, top - 56.0, 0.6);
    }
    c.line(LEFT + 8.0, top - 20.0, LEFT + WIDTH - 8.0, top - 20.0, 0.6);

    c.text("Sr", LEFT + 14.0, top - 12.0, 9.0, Font::Bold);
    c.text("Name of the Product", LEFT + 50.0, top - 12.0, 9.0, Font::Bold);
    c.text("Quantity In gm", LEFT + 300.0, top - 12.0, 9.0, Font::Bold);
    c.text("HSN/SAC", LEFT + 415.0, top - 12.0, 9.0, Font::Bold);

    c.text("1", LEFT + 14.0, top - 37.0, 9.0, Font::Regular);
    c.text(&wo.product_name, LEFT + 50.0, top - 37.0, 9.0, Font::Regular);
    c.text(&wo.quantity_gm.to_string(), LEFT + 300.0, top - 37.0, 9.0, Font::Regular);
    c.text(&wo.hsn_sac, LEFT + 415.0, top - 37.0, 9.0, Font::Regular);

    *y -= 72.0;
}

fn specification_details(c: &mut ContentStream, wo: &WorkOrder, y: &mut f64) {
    c.text("Specification Details", LEFT + 10.0, *y, 11.0, Font::Bold);
    *y -= 10.0;

    let top = *y;
    c.rect(LEFT + 8.0, top - 100.0, WIDTH - 16.0, 100.0, 0.8);
    c.line(LEFT + 40.0, top, LEFT + 40.0, top - 100.0, 0.6);
    c.line(LEFT + 220.0, top, LEFT + 220.0, top - 100.0, 0.6);
    for i in 1..=4 {
        let ry = top - i as f64 * 25.0;
        c.line(LEFT + 8.0, ry, LEFT + WIDTH - 8.0, ry, 0.6);
    }

    let specs = [
        ("1", "Product Size", &wo.product_size),
        ("2", "Specific Requirements", &wo.specific_requirements),
        ("3", "Type of Packaging", &wo.packaging_type),
        ("4", "Reference Sample", &wo.reference_sample),
    ];
    for (i, (no, name, value)) in specs.iter().enumerate() {
        let ry = top - i as f64 * 25.0 - 16.0;
        c.text(no, LEFT + 14.0, ry, 9.0, Font::Regular);
        c.text(name, LEFT + 48.0, ry, 9.0, Font::Regular);
        for (idx, line) in wrap(value, SPEC_WRAP).iter().take(2).enumerate() {
            c.text(line, LEFT + 228.0, ry - idx as f64 * 10.0, 9.0, Font::Regular);
        }
    }

    *y -= 114.0;
}

fn dispatch_details(c: &mut ContentStream, wo: &WorkOrder, y: &mut f64) {
    c.text("Dispatch Details", LEFT + 10.0, *y, 11.0, Font::Bold);
    *y -= 10.0;

    let top = *y;
    c.rect(LEFT + 8.0, top - 74.0, WIDTH - 16.0, 74.0, 0.8);
    c.line(LEFT + 172.0, top, LEFT + 172.0, top - 74.0, 0.6);
    c.line(LEFT + 336.0, top, LEFT + 336.0, top - 74.0, 0.6);
    for i in 1..=3 {
        let ry = top - i as f64 * 24.0;
        c.line(LEFT + 8.0, ry, LEFT + WIDTH - 8.0, ry, 0.6);
    }

    c.text("Concern Person", LEFT + 12.0, top - 16.0, 9.0, Font::Bold);
    c.text(&wo.concern_person, LEFT + 178.0, top - 16.0, 9.0, Font::Regular);
    c.text("Courier/Transporter", LEFT + 342.0, top - 16.0, 9.0, Font::Bold);
    c.text(
        &wo.courier_transporter_details,
        LEFT + 342.0,
        top - 27.0,
        8.5,
        Font::Regular,
    );
    c.text("Delivery At", LEFT + 12.0, top - 40.0, 9.0, Font::Bold);
    for (idx, line) in wrap(&wo.delivery_at, DELIVERY_WRAP).iter().take(2).enumerate() {
        c.text(line, LEFT + 178.0, top - 40.0 - idx as f64 * 10.0, 9.0, Font::Regular);
    }

    *y -= 92.0;
}

fn signatures(c: &mut ContentStream, y: f64) {
    c.line(LEFT + 8.0, y, LEFT + WIDTH - 8.0, y, 1.0);
    c.text("Prepared by: Admin Manager", LEFT + 14.0, y - 16.0, 9.5, Font::Regular);
    c.text("Verified by: PPC in charge", LEFT + 206.0, y - 16.0, 9.5, Font::Regular);
    c.text("Authorized by: CEO", LEFT + 414.0, y - 16.0, 9.5, Font::Regular);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WorkOrder {
        WorkOrder {
            id: "WO-ABC123".to_string(),
            quotation_id: "QUO-XYZ789".to_string(),
            work_order_no: "PTPL-XYZ789".to_string(),
            date: "2026-02-20".to_string(),
            document_no: "PTPL/MIS/PPC/SWO/2024-25/V1".to_string(),
            client_name: "SunDry Foods (Pune)".to_string(),
            enquiry_promoter: "PTPL/ HO/ Padma".to_string(),
            dispatch_due_date: "2026-03-02".to_string(),
            enquiry_type: "Sales Enquiry".to_string(),
            courier_name: "To be assigned".to_string(),
            product_name: "Dehydrated Onion Flakes".to_string(),
            quantity_gm: 5000.0,
            hsn_sac: "N/A".to_string(),
            product_size: "Standard".to_string(),
            specific_requirements: "As per quotation / customer standards".to_string(),
            packaging_type: "Standard export packing".to_string(),
            reference_sample: "Approved reference sample".to_string(),
            concern_person: "SunDry Foods".to_string(),
            delivery_at: "Warehouse 4, MIDC Industrial Area, Plot 17, Ranjangaon Road, Shirur Taluka, Pune District 412220".to_string(),
            courier_transporter_details: "Pending transporter allocation".to_string(),
        }
    }

    #[test]
    fn test_fields_land_at_fixed_coordinates() {
        let text = String::from_utf8(render(&sample())).unwrap();

        assert!(text.contains("1.1 w 34 34 527 774 re S"));
        assert!(text.contains("BT /F2 13 Tf 1 0 0 1 44 782 Tm (SAMPLE WORK ORDER STANDARD TEMPLATE / V1) Tj ET"));
        assert!(text.contains("BT /F1 10 Tf 1 0 0 1 44 748 Tm (Date: 2026-02-20) Tj ET"));
        assert!(text.contains("(PTPL-XYZ789 / 2026-02-20) Tj ET"));
        assert!(text.contains("(SunDry Foods \\(Pune\\)) Tj ET"));
        assert!(text.contains("(5000) Tj ET"));
        assert!(text.contains("BT /F1 8.5 Tf"));
        assert!(text.contains("(Authorized by: CEO) Tj ET"));
    }

    #[test]
    fn test_delivery_address_wraps_to_two_lines() {
        let text = String::from_utf8(render(&sample())).unwrap();
        let wrapped = wrap(&sample().delivery_at, 35);
        assert!(wrapped.len() > 2);
        assert!(text.contains(&format!("({}) Tj ET", wrapped[0])));
        assert!(text.contains(&format!("({}) Tj ET", wrapped[1])));
        assert!(!text.contains(&format!("({}) Tj ET", wrapped[2])));
    }
}
