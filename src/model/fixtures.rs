// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of HQC-MDD and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared test inputs.

/// A small i* model of a researcher scheduling jobs on a quantum cloud.
pub(crate) const QUANTUM_SCHEDULER_XML: &str = r##"<mxfile host="drawio">
  <diagram id="istar" name="Quantum scheduler">
    <mxGraphModel dx="1000" dy="800" grid="1">
      <root>
        <mxCell id="0" />
        <mxCell id="1" parent="0" />
        <object id="a1" type="actor" label="Researcher" owner="lab">
          <mxCell style="shape=ellipse;container=1" vertex="1" parent="1">
            <mxGeometry x="0" y="0" width="600" height="400" as="geometry" />
          </mxCell>
        </object>
        <object id="a2" type="agent" label="Quantum &lt;b&gt;Cloud&lt;/b&gt;">
          <mxCell style="shape=ellipse" vertex="1" parent="1">
            <mxGeometry x="700" y="0" width="80" height="80" as="geometry" />
          </mxCell>
        </object>
        <object id="g1" type="goal" label="Schedule&amp;nbsp;jobs">
          <mxCell style="rounded=1" vertex="1" parent="a1">
            <mxGeometry x="40" y="40" width="120" height="40" as="geometry" />
          </mxCell>
        </object>
        <object id="g2" type="goal" label="Run Grover search">
          <mxCell style="rounded=1" vertex="1" parent="a1">
            <mxGeometry x="200" y="40" width="120" height="40" as="geometry" />
          </mxCell>
        </object>
        <object id="g3" type="goal" label="Integrate hybrid backend">
          <mxCell style="rounded=1" vertex="1" parent="a2">
            <mxGeometry x="10" y="10" width="60" height="40" as="geometry" />
          </mxCell>
        </object>
        <object id="g4" type="goal" label="Respect coherence time">
          <mxCell style="rounded=1" vertex="1" parent="1">
            <mxGeometry x="400" y="300" width="120" height="40" as="geometry" />
          </mxCell>
        </object>
        <object id="t1" type="task" label="Queue job fast">
          <mxCell style="shape=hexagon" vertex="1" parent="a1">
            <mxGeometry x="20" y="120" width="100" height="40" as="geometry" />
          </mxCell>
        </object>
        <object id="t2" type="task" label="Queue job batch">
          <mxCell style="shape=hexagon" vertex="1" parent="a1">
            <mxGeometry x="140" y="120" width="100" height="40" as="geometry" />
          </mxCell>
        </object>
        <object id="t3" type="task" label="Write Qiskit program">
          <mxCell style="shape=hexagon" vertex="1" parent="a1">
            <mxGeometry x="260" y="120" width="100" height="40" as="geometry" />
          </mxCell>
        </object>
        <object id="s1" type="softgoal" label="High performance">
          <mxCell style="shape=cloud" vertex="1" parent="a1">
            <mxGeometry x="400" y="40" width="100" height="40" as="geometry" />
          </mxCell>
        </object>
        <object id="r1" type="resource" label="Job database">
          <mxCell style="shape=rect" vertex="1" parent="a1">
            <mxGeometry x="20" y="200" width="100" height="40" as="geometry" />
          </mxCell>
        </object>
        <object id="t9" type="task" label="">
          <mxCell style="shape=hexagon" vertex="1" parent="a1" />
        </object>
        <object id="l1" type="qualification-link" value="">
          <mxCell edge="1" source="s1" target="g1" parent="1" />
        </object>
        <object id="l2" type="needed-by" value="">
          <mxCell edge="1" source="r1" target="t1" parent="1" />
        </object>
        <object id="l3" type="contribution" value="help">
          <mxCell edge="1" source="t2" target="s1" parent="1" />
        </object>
        <object id="l4" type="contribution" value="hurt">
          <mxCell edge="1" source="g3" target="g4" parent="1" />
        </object>
        <object id="l5" type="refinement" value="or">
          <mxCell edge="1" source="t1" target="g1" parent="1" />
        </object>
        <object id="l6" type="refinement" value="or">
          <mxCell edge="1" source="t2" target="g1" parent="1" />
        </object>
        <object id="l7" type="and-refinement">
          <mxCell edge="1" source="t3" target="g2" parent="1" />
        </object>
        <object id="l8" type="needed-by">
          <mxCell edge="1" source="r1" parent="1" />
        </object>
        <mxCell id="e1" value="" style="endArrow=classic" edge="1" source="g2" target="g3" parent="1">
          <mxGeometry relative="1" as="geometry" />
        </mxCell>
        <mxCell id="e2" value="job &lt;i&gt;results&lt;/i&gt;" edge="1" source="a1" target="a2" parent="1">
          <mxGeometry relative="1" as="geometry" />
        </mxCell>
        <mxCell id="e-broken" edge="1" source="g1" parent="1" />
      </root>
    </mxGraphModel>
  </diagram>
</mxfile>
"##;
