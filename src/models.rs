//! Frontend Models
//!
//! Estimate rows as exchanged with the remote row service.

use serde::{Deserialize, Deserializer, Serialize};

/// Row identifier as assigned by the server
pub type RowId = i64;

/// Id carried by the single local, not-yet-persisted row.
/// The server only ever assigns positive ids.
pub const DRAFT_ROW_ID: RowId = -1;

/// A node of the cost-estimate tree (matches the service's JSON)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: RowId,
    /// Informational only; containment in `children` is authoritative
    #[serde(default)]
    pub parent_id: Option<RowId>,
    #[serde(rename = "child", default, deserialize_with = "null_as_empty")]
    pub children: Vec<Row>,
    #[serde(default)]
    pub row_name: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub equipment_costs: f64,
    #[serde(default)]
    pub overheads: f64,
    #[serde(default)]
    pub estimated_profit: f64,
    // Derived by the server, never edited here
    #[serde(default)]
    pub materials: f64,
    #[serde(default)]
    pub mim_exploitation: f64,
    #[serde(default)]
    pub support_costs: f64,
    #[serde(default)]
    pub main_costs: f64,
    #[serde(default)]
    pub machine_operator_salary: f64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Row>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Row>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Row {
    /// Empty draft row to be appended under `parent_id`
    pub fn draft(parent_id: RowId) -> Self {
        Self {
            id: DRAFT_ROW_ID,
            parent_id: Some(parent_id),
            ..Default::default()
        }
    }

    pub fn is_draft(&self) -> bool {
        self.id == DRAFT_ROW_ID
    }

    /// Editable subset of this row
    pub fn fields(&self) -> RowFields {
        RowFields {
            row_name: self.row_name.clone(),
            salary: self.salary,
            equipment_costs: self.equipment_costs,
            overheads: self.overheads,
            estimated_profit: self.estimated_profit,
        }
    }

    /// Copy of this row without its subtree
    pub fn detached(&self) -> Self {
        Self {
            children: Vec::new(),
            ..self.clone()
        }
    }

    /// Take every value of `other` except id and children
    pub fn copy_values_from(&mut self, other: &Row) {
        self.parent_id = other.parent_id;
        self.row_name = other.row_name.clone();
        self.salary = other.salary;
        self.equipment_costs = other.equipment_costs;
        self.overheads = other.overheads;
        self.estimated_profit = other.estimated_profit;
        self.materials = other.materials;
        self.mim_exploitation = other.mim_exploitation;
        self.support_costs = other.support_costs;
        self.main_costs = other.main_costs;
        self.machine_operator_salary = other.machine_operator_salary;
    }

    /// Identity used for keyed rendering: changes whenever any shown value does
    pub fn render_key(&self) -> RowKey {
        RowKey {
            id: self.id,
            parent_id: self.parent_id,
            row_name: self.row_name.clone(),
            amounts: [
                self.salary,
                self.equipment_costs,
                self.overheads,
                self.estimated_profit,
                self.materials,
                self.mim_exploitation,
                self.support_costs,
                self.main_costs,
                self.machine_operator_salary,
            ]
            .map(f64::to_bits),
        }
    }
}

impl row_tree::TreeNode for Row {
    type Id = RowId;

    fn id(&self) -> RowId {
        self.id
    }

    fn children(&self) -> &[Row] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Row> {
        &mut self.children
    }

    /// Saved rows come back without their subtree, so an empty
    /// `child` list keeps the children already shown.
    fn merge_from(&mut self, other: Row) {
        self.id = other.id;
        self.copy_values_from(&other);
        if !other.children.is_empty() {
            self.children = other.children;
        }
    }
}

/// Hashable snapshot of a row's shown values
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    id: RowId,
    parent_id: Option<RowId>,
    row_name: String,
    amounts: [u64; 9],
}

/// The user-editable values of a row
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowFields {
    pub row_name: String,
    pub salary: f64,
    pub equipment_costs: f64,
    pub overheads: f64,
    pub estimated_profit: f64,
}

impl RowFields {
    pub fn amount(&self, field: RowField) -> Option<f64> {
        match field {
            RowField::RowName => None,
            RowField::Salary => Some(self.salary),
            RowField::EquipmentCosts => Some(self.equipment_costs),
            RowField::Overheads => Some(self.overheads),
            RowField::EstimatedProfit => Some(self.estimated_profit),
        }
    }

    pub fn amount_mut(&mut self, field: RowField) -> Option<&mut f64> {
        match field {
            RowField::RowName => None,
            RowField::Salary => Some(&mut self.salary),
            RowField::EquipmentCosts => Some(&mut self.equipment_costs),
            RowField::Overheads => Some(&mut self.overheads),
            RowField::EstimatedProfit => Some(&mut self.estimated_profit),
        }
    }

    /// Text shown in the input for `field`
    pub fn display(&self, field: RowField) -> String {
        match self.amount(field) {
            Some(value) => value.to_string(),
            None => self.row_name.clone(),
        }
    }
}

/// Editable columns, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowField {
    RowName,
    Salary,
    EquipmentCosts,
    Overheads,
    EstimatedProfit,
}

impl RowField {
    pub const ALL: [RowField; 5] = [
        RowField::RowName,
        RowField::Salary,
        RowField::EquipmentCosts,
        RowField::Overheads,
        RowField::EstimatedProfit,
    ];

    pub const AMOUNTS: [RowField; 4] = [
        RowField::Salary,
        RowField::EquipmentCosts,
        RowField::Overheads,
        RowField::EstimatedProfit,
    ];

    /// Column header
    pub fn label(&self) -> &'static str {
        match self {
            RowField::RowName => "Наименование работ",
            RowField::Salary => "Основная з/п",
            RowField::EquipmentCosts => "Оборудование",
            RowField::Overheads => "Накладные расходы",
            RowField::EstimatedProfit => "Сметная прибыль",
        }
    }

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Body of create and update requests
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRequest {
    pub parent_id: Option<RowId>,
    pub row_name: String,
    pub salary: f64,
    pub equipment_costs: f64,
    pub overheads: f64,
    pub estimated_profit: f64,
    pub materials: f64,
    pub mim_exploitation: f64,
    pub support_costs: f64,
    pub main_costs: f64,
    pub machine_operator_salary: f64,
}

impl RowRequest {
    /// `row` supplies the parent and derived values, `fields` the edits
    pub fn new(row: &Row, fields: &RowFields) -> Self {
        Self {
            parent_id: row.parent_id,
            row_name: fields.row_name.trim().to_string(),
            salary: fields.salary,
            equipment_costs: fields.equipment_costs,
            overheads: fields.overheads,
            estimated_profit: fields.estimated_profit,
            materials: row.materials,
            mim_exploitation: row.mim_exploitation,
            support_costs: row.support_costs,
            main_costs: row.main_costs,
            machine_operator_salary: row.machine_operator_salary,
        }
    }
}

/// Reply to create, update and delete
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RowResponse {
    #[serde(default)]
    pub current: Option<Row>,
    /// Other rows the server recalculated (e.g. ancestor totals)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub changed: Vec<Row>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use row_tree::TreeNode;

    #[test]
    fn test_row_from_service_json() {
        let json = r#"{
            "id": 7,
            "parentId": null,
            "rowName": "Foundation",
            "salary": 1200.5,
            "equipmentCosts": 10,
            "overheads": 0,
            "estimatedProfit": 3,
            "materials": 4,
            "mimExploitation": 0,
            "supportCosts": 0,
            "mainCosts": 0,
            "machineOperatorSalary": 0,
            "child": [{ "id": 8, "parentId": 7, "rowName": "Pit", "child": null }]
        }"#;

        let row: Row = serde_json::from_str(json).unwrap();

        assert_eq!(row.id, 7);
        assert_eq!(row.parent_id, None);
        assert_eq!(row.salary, 1200.5);
        assert_eq!(row.children.len(), 1);
        assert_eq!(row.children[0].parent_id, Some(7));
        assert!(row.children[0].children.is_empty());
        assert_eq!(row.children[0].salary, 0.0);
    }

    #[test]
    fn test_request_uses_camel_case() {
        let mut row = Row::draft(3);
        row.materials = 2.0;
        let fields = RowFields {
            row_name: "  Excavation ".to_string(),
            salary: 5.0,
            ..Default::default()
        };

        let value = serde_json::to_value(RowRequest::new(&row, &fields)).unwrap();

        assert_eq!(value["parentId"], 3);
        assert_eq!(value["rowName"], "Excavation");
        assert_eq!(value["salary"], 5.0);
        assert_eq!(value["materials"], 2.0);
        assert!(value.get("id").is_none());
        assert!(value.get("child").is_none());
    }

    #[test]
    fn test_response_without_changed() {
        let response: RowResponse = serde_json::from_str(r#"{ "current": null }"#).unwrap();
        assert_eq!(response, RowResponse::default());
    }

    #[test]
    fn test_draft_row() {
        let draft = Row::draft(1);
        assert!(draft.is_draft());
        assert_eq!(draft.parent_id, Some(1));
        assert!(draft.row_name.is_empty());
        assert_eq!(draft.fields(), RowFields::default());
    }

    #[test]
    fn test_merge_keeps_children_unless_replaced() {
        let mut parent = Row {
            id: 1,
            children: vec![Row { id: 2, ..Default::default() }],
            ..Default::default()
        };

        parent.merge_from(Row { id: 1, row_name: "Walls".into(), ..Default::default() });
        assert_eq!(parent.row_name, "Walls");
        assert_eq!(parent.children.len(), 1);

        parent.merge_from(Row {
            id: 1,
            children: vec![
                Row {
                    id: 3,
                    ..Default::default()
                },
                Row {
                    id: 4,
                    ..Default::default()
                },
            ],
            ..Default::default()
        });
        assert_eq!(parent.children.len(), 2);
    }

    #[test]
    fn test_render_key_tracks_values() {
        let row = Row { id: 1, salary: 1.0, ..Default::default() };
        let mut changed = row.clone();
        changed.main_costs = 2.0;
        assert_ne!(row.render_key(), changed.render_key());
        assert_eq!(row.render_key(), row.clone().render_key());
    }
}
