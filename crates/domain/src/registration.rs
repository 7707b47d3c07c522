//! # ワークショップ登録フォームカタログ
//!
//! 本番のワークショップ登録フォームのフィールド定義とステップ分割。
//! ラベルと選択肢は英語・アラビア語のバイリンガル表記（静的テキスト）。
//!
//! フィールドは 1 ステップ 1 フィールドで提示される。ワークショップ希望の
//! 5 フィールドは複数選択かつ任意入力のためルールを持たない。

use crate::{
    field::{FieldDefinition, ValidationRule},
    form::{FormDefinition, Step},
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// ワークショップ登録フォームの定義を構築する
pub fn registration_form() -> FormDefinition {
    let fields = vec![
        FieldDefinition::text("email", "Email").with_rules(vec![
            ValidationRule::required("Email is required"),
            ValidationRule::email_format("Must be a valid email address"),
        ]),
        FieldDefinition::text("name", "Name")
            .with_rules(vec![ValidationRule::required("Name is a required field")]),
        FieldDefinition::select(
            "gender",
            "Gender / النوع",
            strings(&["Male / ذكر", "Female / أنثى"]),
        )
        .with_rules(vec![ValidationRule::required("Gender is a required field")]),
        FieldDefinition::select("age", "Age / العمر", strings(&["18-25", "25-30", "30+"]))
            .with_rules(vec![ValidationRule::required("Age is a required field")]),
        FieldDefinition::text("phone", "Phone Number / رقم الهاتف").with_rules(vec![
            ValidationRule::required("Phone Number is a required field"),
        ]),
        FieldDefinition::text("whatsapp", "WhatsApp Number / رقم الواتساب").with_rules(vec![
            ValidationRule::required("WhatsApp Number is a required field"),
        ]),
        FieldDefinition::select(
            "residency",
            "Residency / مكان الإقامة",
            strings(&[
                "Mokattam / المقطم",
                "Maadi / المعادي",
                "Nasr City / مدينة نصر",
                "Tagamo (1st / 3rd / 5th) / التجمع (الأول / الثالث / الخامس)",
                "Misr al-Jadida / مصر الجديدة",
                "Faisal / فيصل",
                "Dokki / الدقي",
                "Mohandiseen / المهندسين",
                "Hadayek El Ahram / حدائق الأهرام",
                "6th October / السادس من أكتوبر",
                "Helwan / حلوان",
                "Madinaty / مدينتي",
                "Shorooq / الشروق",
                "Obour / العبور",
                "Rehab / الرحاب",
                "Badr City / بدر",
                "Shubra / شبرا",
            ]),
        )
        .with_rules(vec![ValidationRule::required("Residency is a required field")]),
        FieldDefinition::select(
            "career",
            "Where are you currently in your career? / أين أنت حاليا في حياتك المهنية؟",
            strings(&[
                "Student / طالب",
                "Fresh Graduate / خريج حديثا",
                "Career Shifting / تغيير مسار مهني",
            ]),
        )
        .with_rules(vec![ValidationRule::required(
            "Career status is a required field",
        )]),
        FieldDefinition::multi_select(
            "workshops1",
            "What workshops do you want to attend? (10 AM – 12 PM)",
            strings(&[
                "كيف تستعد لـ OET",
                "Medical Research and Scientific Writing",
                "مهارات الجراح الموهوب",
                "Clinical Skills",
            ]),
        )
        .into_optional(),
        FieldDefinition::multi_select(
            "workshops2",
            "What workshops do you want to attend? (12 PM – 2 PM)",
            strings(&[
                "ICDL",
                "الإسعافات الأولية",
                "اتخرجت يا دكتور وبعدين؟",
                "أسرار السيرة الذاتية",
            ]),
        )
        .into_optional(),
        FieldDefinition::multi_select(
            "workshops3",
            "What workshops do you want to attend? (2 PM – 4 PM)",
            strings(&[
                "الإلقاء والصوت",
                "كتابة المحتوى",
                "How to Live a Healthy Lifestyle",
                "بتعرف شنو عن ريادة الأعمال؟",
            ]),
        )
        .into_optional(),
        FieldDefinition::multi_select(
            "workshops4",
            "What workshops do you want to attend? (4 PM – 6 PM)",
            strings(&[
                "مهارات البيع الاحترافي",
                "Communication Skills",
                "Freelance",
                "Graphic Design",
            ]),
        )
        .into_optional(),
        FieldDefinition::multi_select(
            "workshops5",
            "What workshops do you want to attend? (6 PM – 8 PM)",
            strings(&[
                "كيف تبقى صانع محتوى",
                "Digital Marketing",
                "افكارك مرآة افعالك",
                "التحدث امام الجمهور",
            ]),
        )
        .into_optional(),
    ];

    let steps = fields
        .iter()
        .map(|f| Step::single(f.key.as_str()))
        .collect();

    FormDefinition { fields, steps }
}
