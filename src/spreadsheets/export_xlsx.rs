use crate::domain::views::LowScoreReview;
use crate::errors::ServerError;
use rust_xlsxwriter::{Format, Workbook};

/// Highlighted reviews as an xlsx workbook, in the order given.
pub fn export_low_score_xlsx(reviews: &[LowScoreReview]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    // Headers
    let headers = ["Dealership", "Review", "Owner Answer", "Rating", "Review Date"];

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    // Rows
    for (i, review) in reviews.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &review.name)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write dealership: {}", e)))?;

        let text = review.review_text.as_deref().unwrap_or("");
        worksheet
            .write_string(r, 1, text)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write review text: {}", e)))?;

        let answer = review.owner_answer.as_deref().unwrap_or("");
        worksheet
            .write_string(r, 2, answer)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write owner answer: {}", e)))?;

        worksheet
            .write_number(r, 3, review.review_rating as f64)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write rating: {}", e)))?;

        worksheet
            .write_string(r, 4, review.review_datetime.format("%Y-%m-%d").to_string())
            .map_err(|e| ServerError::XlsxError(format!("Failed to write review date: {}", e)))?;
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}
