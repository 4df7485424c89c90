use crate::record::Field;

/// Human-facing metadata for one input field.
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo {
    pub field: Field,
    pub label: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub unit: Option<&'static str>,
    pub values: &'static [(u8, &'static str)],
    pub importance: &'static str,
}

pub fn catalog() -> Vec<FieldInfo> {
    Field::ALL.iter().map(|&f| field_info(f)).collect()
}

pub fn field_info(field: Field) -> FieldInfo {
    let (label, title, description, unit, values, importance): (
        &'static str,
        &'static str,
        &'static str,
        Option<&'static str>,
        &'static [(u8, &'static str)],
        &'static str,
    ) = match field {
        Field::Age => (
            "Age",
            "Age",
            "Age in years",
            Some("years"),
            &[],
            "Higher age correlates with increased risk of heart disease",
        ),
        Field::Sex => (
            "Gender",
            "Sex",
            "Gender (1 = male, 0 = female)",
            None,
            &[(0, "Female"), (1, "Male")],
            "Males are statistically at higher risk for heart disease",
        ),
        Field::Cp => (
            "Chest Pain",
            "Chest Pain Type",
            "Chest pain type (0-3)",
            None,
            &[
                (0, "Typical Angina"),
                (1, "Atypical Angina"),
                (2, "Non-Anginal Pain"),
                (3, "Asymptomatic"),
            ],
            "Different types of chest pain indicate different levels of heart disease risk",
        ),
        Field::Trestbps => (
            "Blood Pressure",
            "Resting Blood Pressure",
            "Resting blood pressure (mm Hg)",
            Some("mm Hg"),
            &[],
            "High blood pressure is a major risk factor for heart disease",
        ),
        Field::Chol => (
            "Cholesterol",
            "Serum Cholesterol",
            "Serum cholesterol (mg/dl)",
            Some("mg/dl"),
            &[],
            "High cholesterol can lead to arterial plaque buildup and heart disease",
        ),
        Field::Fbs => (
            "Blood Sugar",
            "Fasting Blood Sugar",
            "Fasting blood sugar > 120 mg/dl (1 = true, 0 = false)",
            None,
            &[(0, "False"), (1, "True")],
            "High blood sugar may indicate diabetes, a risk factor for heart disease",
        ),
        Field::Restecg => (
            "Resting ECG",
            "Resting ECG",
            "Resting electrocardiographic results (0-2)",
            None,
            &[
                (0, "Normal"),
                (1, "ST-T Wave Abnormality"),
                (2, "Left Ventricular Hypertrophy"),
            ],
            "Abnormal ECG results can indicate existing heart problems",
        ),
        Field::Thalach => (
            "Max Heart Rate",
            "Maximum Heart Rate",
            "Maximum heart rate achieved",
            Some("bpm"),
            &[],
            "Lower max heart rate can indicate cardiovascular issues",
        ),
        Field::Exang => (
            "Exercise Angina",
            "Exercise Induced Angina",
            "Exercise induced angina (1 = yes, 0 = no)",
            None,
            &[(0, "No"), (1, "Yes")],
            "Exercise-induced chest pain is a strong indicator of heart disease",
        ),
        Field::Oldpeak => (
            "ST Depression",
            "ST Depression",
            "ST depression induced by exercise relative to rest",
            Some("mm"),
            &[],
            "Greater ST depression can indicate serious heart issues",
        ),
        Field::Slope => (
            "ST Slope",
            "ST Slope",
            "Slope of the peak exercise ST segment (0-2)",
            None,
            &[(0, "Upsloping"), (1, "Flat"), (2, "Downsloping")],
            "The slope pattern can indicate different heart conditions",
        ),
        Field::Ca => (
            "Major Vessels",
            "Major Vessels",
            "Number of major vessels colored by fluoroscopy (0-4)",
            None,
            &[],
            "More colored vessels indicates more severe coronary artery disease",
        ),
        Field::Thal => (
            "Thalassemia",
            "Thalassemia",
            "Thalassemia (0-3)",
            None,
            &[
                (0, "Normal"),
                (1, "Fixed Defect"),
                (2, "Reversible Defect"),
                (3, "Unknown"),
            ],
            "Abnormal thalassemia results can indicate heart issues",
        ),
    };

    FieldInfo {
        field,
        label,
        title,
        description,
        unit,
        values,
        importance,
    }
}
