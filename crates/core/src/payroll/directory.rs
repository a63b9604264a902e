//! Read-only lookups of contracts and employees.

use std::collections::HashMap;

use hrpay_shared::types::{ContractId, EmployeeId};

use super::types::{Contract, Employee};

/// Source of contract and employee records owned elsewhere.
pub trait Directory {
    /// Looks up a contract.
    fn contract(&self, id: ContractId) -> Option<&Contract>;

    /// Looks up an employee.
    fn employee(&self, id: EmployeeId) -> Option<&Employee>;
}

/// HashMap-backed directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    contracts: HashMap<ContractId, Contract>,
    employees: HashMap<EmployeeId, Employee>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a contract.
    pub fn add_contract(&mut self, contract: Contract) {
        self.contracts.insert(contract.id, contract);
    }

    /// Adds or replaces an employee.
    pub fn add_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.id, employee);
    }

    /// Number of contracts.
    #[must_use]
    pub fn contract_count(&self) -> usize {
        self.contracts.len()
    }
}

impl Directory for InMemoryDirectory {
    fn contract(&self, id: ContractId) -> Option<&Contract> {
        self.contracts.get(&id)
    }

    fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&id)
    }
}

impl FromIterator<Contract> for InMemoryDirectory {
    fn from_iter<I: IntoIterator<Item = Contract>>(iter: I) -> Self {
        let mut directory = Self::new();
        for contract in iter {
            directory.add_contract(contract);
        }
        directory
    }
}
