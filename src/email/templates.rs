use crate::submission::record::SubmissionRecord;

pub fn subject(record: &SubmissionRecord) -> String {
    format!(
        "[{}] {} 상태 현황 보고 ({})",
        record.vessel, record.equipment, record.name
    )
}

pub fn body(record: &SubmissionRecord) -> String {
    format!(
        "[함정 장비 상태 접수 알림]\n\
         \n\
         ■ 함정명: {vessel} ({department})\n\
         ■ 장비명: {equipment} (모델: {model})\n\
         ■ 작성자: {reporter}\n\
         ■ 연락처: {phone}\n\
         ■ 지원 요청 항목: {action_req}\n\
         \n\
         ※ 상세 내용은 첨부된 PDF 파일을 확인해 주세요.\n",
        vessel = record.vessel,
        department = record.department,
        equipment = record.equipment,
        model = record.model,
        reporter = record.reporter(),
        phone = record.phone,
        action_req = record.action_req,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::record::ReportForm;

    fn sample_record() -> SubmissionRecord {
        ReportForm {
            vessel: "117정".to_string(),
            department: "기관".to_string(),
            rank: "경사".to_string(),
            name: "홍길동".to_string(),
            phone: "010-1234-5678".to_string(),
            equipment: "발전기".to_string(),
            model: "ABC-100".to_string(),
            action_req: "부품 교체".to_string(),
            condition: "작동 불가".to_string(),
            status: "누유 발생".to_string(),
        }
        .validate()
        .expect("sample record")
    }

    #[test]
    fn subject_names_vessel_equipment_and_reporter() {
        assert_eq!(
            subject(&sample_record()),
            "[117정] 발전기 상태 현황 보고 (홍길동)"
        );
    }

    #[test]
    fn body_summarizes_the_record() {
        let body = body(&sample_record());
        assert!(body.contains("117정 (기관)"));
        assert!(body.contains("발전기 (모델: ABC-100)"));
        assert!(body.contains("경사 홍길동"));
        assert!(body.contains("부품 교체"));
    }
}
